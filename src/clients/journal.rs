/* segtrack - analytics metadata tracking for action dispatch pipelines
 * Copyright (C) 2023 Withings
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published
 * by the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program.  If not, see <https://www.gnu.org/licenses/>. */

/// Journal client: writes each call as one JSON line

use crate::clients::AnalyticsClient;
use crate::events::alias::Alias;
use crate::events::any::call_line;
use crate::events::group::Group;
use crate::events::identify::Identify;
use crate::events::kind::EventType;
use crate::events::page::Page;
use crate::events::track::Track;

use std::fmt::Display;
use std::io::Write;
use std::sync::{Mutex, PoisonError};
use serde_json;
use log;

/// Writes calls to any writer, one [method, ...arguments] array per line
pub struct Journal<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> Journal<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    /// Gives the writer back, for instance to inspect a buffer
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self, event_type: EventType, arguments: Vec<serde_json::Value>) {
        let line = call_line(event_type, arguments);
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        /* Analytics must never break the pipeline: report and move on */
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            log::warn!("failed to write {} call to journal: {}", event_type, e);
        }
    }
}

impl<W: Write + Send> Display for Journal<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_str("journal")
    }
}

impl<W: Write + Send> AnalyticsClient for Journal<W> {
    fn track(&self, track: &Track) {
        self.write(EventType::Track, track.arguments());
    }

    fn identify(&self, identify: &Identify) {
        self.write(EventType::Identify, identify.arguments());
    }

    fn page(&self, page: &Page) {
        self.write(EventType::Page, page.arguments());
    }

    fn group(&self, group: &Group) {
        self.write(EventType::Group, group.arguments());
    }

    fn alias(&self, alias: &Alias) {
        self.write(EventType::Alias, alias.arguments());
    }

    fn reset(&self) {
        self.write(EventType::Reset, vec!());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_one_line_per_call() {
        let journal = Journal::new(Vec::<u8>::new());
        journal.group(&Group { group_id: "G1".into(), traits: None, options: None });
        journal.reset();

        let output = String::from_utf8(journal.into_inner()).unwrap();
        assert_eq!(output, "[\"group\",\"G1\"]\n[\"reset\"]\n");
    }
}
