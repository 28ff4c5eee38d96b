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

use crate::error::{TrackerError, TrackerResult};
use crate::events::common::{parse_payload, positional, Argument, Fields};
use crate::events::kind::EventType;

use serde::{Deserialize, Serialize};
use serde_json;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct PagePayload {
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    properties: Option<Fields>,
    #[serde(default)]
    options: Option<Fields>,
}

/// A page call: page([[category,] name,] [properties[, options]])
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub properties: Option<Fields>,
    #[serde(default)]
    pub options: Option<Fields>,
}

impl Page {
    /// Validates a page payload: a category cannot be sent without a name
    pub fn from_payload(payload: &Fields) -> TrackerResult<Self> {
        let payload: PagePayload = parse_payload(EventType::Page, payload)?;
        if payload.category.is_some() && payload.name.is_none() {
            return Err(TrackerError::missing("name", EventType::Page));
        }

        Ok(Self {
            category: payload.category,
            name: payload.name,
            properties: payload.properties,
            options: payload.options,
        })
    }

    /// Positional arguments, category and name lead when present
    pub fn arguments(&self) -> Vec<serde_json::Value> {
        let mut arguments = vec!();
        if let Some(category) = &self.category {
            arguments.push(Argument::given(category.as_str()));
        }
        if let Some(name) = &self.name {
            arguments.push(Argument::given(name.as_str()));
        }
        arguments.push(Argument::mapping(&self.properties));
        arguments.push(Argument::mapping(&self.options));
        positional(arguments)
    }
}
