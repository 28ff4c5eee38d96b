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

/// Event kinds understood by the analytics client

use crate::error::TrackerError;

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// The analytics client method an action's metadata selects
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Track,
    Identify,
    Page,
    Group,
    Alias,
    Reset,
}

impl EventType {
    /// All known kinds, in client method order
    pub const ALL: [EventType; 6] = [
        EventType::Track,
        EventType::Identify,
        EventType::Page,
        EventType::Group,
        EventType::Alias,
        EventType::Reset,
    ];

    /// The client method name for this kind
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Track => "track",
            EventType::Identify => "identify",
            EventType::Page => "page",
            EventType::Group => "group",
            EventType::Alias => "alias",
            EventType::Reset => "reset",
        }
    }
}

impl Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL.iter()
            .find(|t| t.as_str() == s)
            .copied()
            .ok_or_else(|| TrackerError::UnknownEventType(s.into()))
    }
}
