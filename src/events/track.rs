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

/// Track event

use crate::error::{TrackerError, TrackerResult};
use crate::events::common::{parse_payload, positional, Argument, Fields};
use crate::events::kind::EventType;

use serde::{Deserialize, Serialize};
use serde_json;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct TrackPayload {
    #[serde(default)]
    event: Option<String>,
    #[serde(default)]
    properties: Option<Fields>,
    #[serde(default)]
    options: Option<Fields>,
}

/// A track call: track(event[, properties[, options]])
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    pub event: String,
    #[serde(default)]
    pub properties: Option<Fields>,
    #[serde(default)]
    pub options: Option<Fields>,
}

impl Track {
    /// Validates a track payload; the event name falls back to the action type
    pub fn from_payload(payload: &Fields, action_type: &str) -> TrackerResult<Self> {
        let payload: TrackPayload = parse_payload(EventType::Track, payload)?;
        let event = payload.event
            .or_else(|| Some(action_type.to_string()))
            .filter(|e| !e.is_empty())
            .ok_or(TrackerError::missing("event", EventType::Track))?;

        Ok(Self {
            event,
            properties: payload.properties,
            options: payload.options,
        })
    }

    /// Positional arguments, properties become {} when only options are given
    pub fn arguments(&self) -> Vec<serde_json::Value> {
        positional(vec!(
            Argument::given(self.event.as_str()),
            Argument::mapping(&self.properties),
            Argument::mapping(&self.options),
        ))
    }
}
