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

/// Helpers shared by all event payloads

use crate::error::{TrackerError, TrackerResult};
use crate::events::kind::EventType;

use serde::de::DeserializeOwned;
use serde_json;

/// Convenience type: a free-form mapping (traits, properties, options, payloads)
pub type Fields = serde_json::Map<String, serde_json::Value>;

/// Reads a typed payload out of the generic one, naming the event on failure
pub fn parse_payload<T: DeserializeOwned>(event_type: EventType, payload: &Fields) -> TrackerResult<T> {
    serde_json::from_value(serde_json::Value::Object(payload.clone()))
        .map_err(|e| TrackerError::InvalidMetadata(format!("{} payload: {}", event_type, e)))
}

/// A positional argument: its value if supplied, and what stands in for it
/// when a later argument is supplied but this one is not
pub struct Argument {
    value: Option<serde_json::Value>,
    placeholder: serde_json::Value,
}

impl Argument {
    /// An argument that is always present
    pub fn given<V: Into<serde_json::Value>>(value: V) -> Self {
        Self { value: Some(value.into()), placeholder: serde_json::Value::Null }
    }

    /// An optional mapping, filled with {} when something follows it
    pub fn mapping(value: &Option<Fields>) -> Self {
        Self {
            value: value.clone().map(serde_json::Value::Object),
            placeholder: serde_json::Value::Object(Fields::new()),
        }
    }

    /// An optional string, filled with null when something follows it
    pub fn string(value: &Option<String>) -> Self {
        Self {
            value: value.clone().map(serde_json::Value::String),
            placeholder: serde_json::Value::Null,
        }
    }
}

/// Builds the shortest positional argument list expressing what was supplied:
/// trailing absent arguments are dropped, inner ones get their placeholder
pub fn positional(arguments: Vec<Argument>) -> Vec<serde_json::Value> {
    let length = arguments.iter()
        .rposition(|a| a.value.is_some())
        .map(|i| i + 1)
        .unwrap_or(0);

    arguments.into_iter()
        .take(length)
        .map(|a| a.value.unwrap_or(a.placeholder))
        .collect()
}
