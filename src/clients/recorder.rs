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

/// In-memory client, records every call as a [method, ...arguments] array

use crate::clients::AnalyticsClient;
use crate::events::alias::Alias;
use crate::events::any::call_line;
use crate::events::group::Group;
use crate::events::identify::Identify;
use crate::events::kind::EventType;
use crate::events::page::Page;
use crate::events::track::Track;

use std::fmt::Display;
use std::sync::{Mutex, MutexGuard, PoisonError};
use serde_json;

/// Keeps calls in memory for inspection, mostly useful in tests
#[derive(Default)]
pub struct Recorder {
    calls: Mutex<Vec<serde_json::Value>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<serde_json::Value>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, event_type: EventType, arguments: Vec<serde_json::Value>) {
        self.lock().push(call_line(event_type, arguments));
    }

    /// A copy of all recorded calls, oldest first
    pub fn calls(&self) -> Vec<serde_json::Value> {
        self.lock().clone()
    }

    /// The nth recorded call, if any
    pub fn get(&self, index: usize) -> Option<serde_json::Value> {
        self.lock().get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Forgets everything recorded so far
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl Display for Recorder {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_str("recorder")
    }
}

impl AnalyticsClient for Recorder {
    fn track(&self, track: &Track) {
        self.record(EventType::Track, track.arguments());
    }

    fn identify(&self, identify: &Identify) {
        self.record(EventType::Identify, identify.arguments());
    }

    fn page(&self, page: &Page) {
        self.record(EventType::Page, page.arguments());
    }

    fn group(&self, group: &Group) {
        self.record(EventType::Group, group.arguments());
    }

    fn alias(&self, alias: &Alias) {
        self.record(EventType::Alias, alias.arguments());
    }

    fn reset(&self) {
        self.record(EventType::Reset, vec!());
    }
}
