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

/// Analytics metadata, as found under meta.analytics

use crate::error::{TrackerError, TrackerResult};
use crate::events::common::Fields;
use crate::events::kind::EventType;

use serde::{Deserialize, Serialize};
use serde_json;

/// A single normalised analytics intent
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSpec {
    pub event_type: EventType,
    #[serde(default)]
    pub event_payload: Fields,
}

impl EventSpec {
    /// A spec with an empty payload, what the shorthand form means
    pub fn bare(event_type: EventType) -> Self {
        Self { event_type, event_payload: Fields::new() }
    }

    /// Parses one spec, either a bare tag or an {eventType, eventPayload} record
    pub fn parse(value: &serde_json::Value) -> TrackerResult<Self> {
        match value {
            serde_json::Value::String(tag) => Ok(EventSpec::bare(tag.parse()?)),
            serde_json::Value::Object(record) => {
                let event_type = match record.get("eventType") {
                    Some(serde_json::Value::String(tag)) => tag.parse()?,
                    Some(_) => return Err(TrackerError::InvalidMetadata("eventType is not a string".into())),
                    None => return Err(TrackerError::InvalidMetadata("missing eventType".into())),
                };
                let event_payload = match record.get("eventPayload") {
                    Some(serde_json::Value::Object(payload)) => payload.clone(),
                    Some(serde_json::Value::Null) | None => Fields::new(),
                    Some(_) => return Err(TrackerError::InvalidMetadata("eventPayload is not a map".into())),
                };
                Ok(Self { event_type, event_payload })
            },
            _ => Err(TrackerError::InvalidMetadata("expected an event type or an {eventType, eventPayload} map".into())),
        }
    }
}

/// Everything an action asks the tracker for, normalised into a list of specs
/// Accepts a bare tag, a record, or a list mixing both
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(try_from = "serde_json::Value", into = "serde_json::Value")]
pub struct AnalyticsMeta {
    specs: Vec<EventSpec>,
}

impl AnalyticsMeta {
    /// Parses raw meta.analytics metadata
    pub fn parse(value: &serde_json::Value) -> TrackerResult<Self> {
        let specs = match value {
            serde_json::Value::Array(items) => items.iter()
                .map(|item| match item {
                    serde_json::Value::Array(_) => Err(TrackerError::InvalidMetadata("nested spec lists are not supported".into())),
                    item => EventSpec::parse(item),
                })
                .collect::<TrackerResult<Vec<EventSpec>>>()?,
            value => vec!(EventSpec::parse(value)?),
        };
        Ok(Self { specs })
    }

    /// The normalised specs, in the order they were given
    pub fn specs(&self) -> &[EventSpec] {
        &self.specs
    }
}

impl From<EventSpec> for AnalyticsMeta {
    fn from(spec: EventSpec) -> Self {
        Self { specs: vec!(spec) }
    }
}

impl From<EventType> for AnalyticsMeta {
    fn from(event_type: EventType) -> Self {
        EventSpec::bare(event_type).into()
    }
}

impl From<Vec<EventSpec>> for AnalyticsMeta {
    fn from(specs: Vec<EventSpec>) -> Self {
        Self { specs }
    }
}

impl TryFrom<serde_json::Value> for AnalyticsMeta {
    type Error = TrackerError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        AnalyticsMeta::parse(&value)
    }
}

impl From<AnalyticsMeta> for serde_json::Value {
    fn from(meta: AnalyticsMeta) -> Self {
        let mut specs: Vec<serde_json::Value> = meta.specs.into_iter()
            .map(|spec| serde_json::json!({
                "eventType": spec.event_type,
                "eventPayload": spec.event_payload,
            }))
            .collect();
        match specs.len() {
            1 => specs.remove(0),
            _ => serde_json::Value::Array(specs),
        }
    }
}
