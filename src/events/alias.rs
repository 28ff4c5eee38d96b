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
struct AliasPayload {
    #[serde(default)]
    user_id: Option<String>,
    #[serde(default)]
    previous_id: Option<String>,
    #[serde(default)]
    options: Option<Fields>,
}

/// An alias call: alias(userId[, previousId[, options]])
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    pub user_id: String,
    #[serde(default)]
    pub previous_id: Option<String>,
    #[serde(default)]
    pub options: Option<Fields>,
}

impl Alias {
    /// Validates an alias payload, userId is mandatory
    pub fn from_payload(payload: &Fields) -> TrackerResult<Self> {
        let payload: AliasPayload = parse_payload(EventType::Alias, payload)?;
        let user_id = payload.user_id
            .filter(|id| !id.is_empty())
            .ok_or(TrackerError::missing("userId", EventType::Alias))?;

        Ok(Self {
            user_id,
            previous_id: payload.previous_id,
            options: payload.options,
        })
    }

    /// previousId becomes null when only options are given
    pub fn arguments(&self) -> Vec<serde_json::Value> {
        positional(vec!(
            Argument::given(self.user_id.as_str()),
            Argument::string(&self.previous_id),
            Argument::mapping(&self.options),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_id_is_required() {
        let err = Alias::from_payload(json!({"previousId": "anon-1"}).as_object().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "missing userId for alias event");
    }

    #[test]
    fn empty_user_id_is_missing() {
        let err = Alias::from_payload(json!({"userId": ""}).as_object().unwrap()).unwrap_err();
        assert_eq!(err, TrackerError::missing("userId", EventType::Alias));
    }

    #[test]
    fn previous_id_hole_is_null() {
        let call = Alias::from_payload(json!({"userId": "u1", "options": {"All": true}}).as_object().unwrap()).unwrap();
        assert_eq!(call.arguments(), vec!(json!("u1"), json!(null), json!({"All": true})));
    }
}
