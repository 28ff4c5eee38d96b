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

use crate::events::kind::EventType;

use thiserror::Error;

/// Everything that can go wrong while turning an action into analytics calls
/// The tracker never retries: these are reported as-is to the caller, which
/// decides whether the dispatch cycle should be aborted
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrackerError {
    /// A mandatory payload field was not provided
    #[error("missing {field} for {event_type} event")]
    MissingField {
        field: &'static str,
        event_type: EventType,
    },

    /// The event type tag is not one the client knows about
    #[error("unknown analytics event type: {0}")]
    UnknownEventType(String),

    /// The analytics metadata (or one of its payloads) has the wrong shape
    #[error("invalid analytics metadata: {0}")]
    InvalidMetadata(String),
}

impl TrackerError {
    /// Convenience constructor for missing fields
    pub fn missing(field: &'static str, event_type: EventType) -> Self {
        TrackerError::MissingField { field, event_type }
    }
}

/// Convenience type: result of any tracking operation
pub type TrackerResult<T> = Result<T, TrackerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_message_names_the_field() {
        let err = TrackerError::missing("groupId", EventType::Group);
        assert_eq!(err.to_string(), "missing groupId for group event");
    }

    #[test]
    fn unknown_event_type_message() {
        let err = TrackerError::UnknownEventType("screen".into());
        assert!(err.to_string().contains("screen"));
    }
}
