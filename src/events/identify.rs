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
struct IdentifyPayload {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    traits: Option<Fields>,
    #[serde(default)]
    options: Option<Fields>,
}

/// An identify call: identify([userId,] [traits[, options]])
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identify {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub traits: Option<Fields>,
    #[serde(default)]
    pub options: Option<Fields>,
}

impl Identify {
    /// Validates an identify payload: anonymous identifies need traits
    pub fn from_payload(payload: &Fields) -> TrackerResult<Self> {
        let payload: IdentifyPayload = parse_payload(EventType::Identify, payload)?;
        let user_id = payload.user_id.filter(|id| !id.is_empty());
        if user_id.is_none() && payload.traits.is_none() {
            return Err(TrackerError::missing("userId", EventType::Identify));
        }

        Ok(Self {
            user_id,
            traits: payload.traits,
            options: payload.options,
        })
    }

    /// Without a userId the client takes the traits first
    pub fn arguments(&self) -> Vec<serde_json::Value> {
        let mut arguments = vec!();
        if let Some(user_id) = &self.user_id {
            arguments.push(Argument::given(user_id.as_str()));
        }
        arguments.push(Argument::mapping(&self.traits));
        arguments.push(Argument::mapping(&self.options));
        positional(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn identify(value: serde_json::Value) -> TrackerResult<Identify> {
        Identify::from_payload(value.as_object().unwrap())
    }

    #[test]
    fn needs_user_id_or_traits() {
        let err = identify(json!({"options": {"All": true}})).unwrap_err();
        assert!(err.to_string().contains("missing userId"));
    }

    #[test]
    fn empty_user_id_is_missing() {
        let err = identify(json!({"userId": ""})).unwrap_err();
        assert_eq!(err, TrackerError::missing("userId", EventType::Identify));

        let call = identify(json!({"userId": "", "traits": {"plan": "pro"}})).unwrap();
        assert_eq!(call.arguments(), vec!(json!({"plan": "pro"})));
    }

    #[test]
    fn user_id_only() {
        assert_eq!(identify(json!({"userId": "u1"})).unwrap().arguments(), vec!(json!("u1")));
    }

    #[test]
    fn anonymous_traits_come_first() {
        let call = identify(json!({"traits": {"email": "user@acme.org"}, "options": {"All": false}})).unwrap();
        assert_eq!(call.arguments(), vec!(json!({"email": "user@acme.org"}), json!({"All": false})));
    }

    #[test]
    fn options_without_traits() {
        let call = identify(json!({"userId": "u1", "options": {"All": false}})).unwrap();
        assert_eq!(call.arguments(), vec!(json!("u1"), json!({}), json!({"All": false})));
    }
}
