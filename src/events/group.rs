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

/// Group event

use crate::error::{TrackerError, TrackerResult};
use crate::events::common::{parse_payload, positional, Argument, Fields};
use crate::events::kind::EventType;

use serde::{Deserialize, Serialize};
use serde_json;

/// The eventPayload of a group spec, as found on the action
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct GroupPayload {
    #[serde(default)]
    group_id: Option<String>,
    #[serde(default)]
    traits: Option<Fields>,
    #[serde(default)]
    options: Option<Fields>,
}

/// A group call: group(groupId[, traits[, options]])
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub group_id: String,
    #[serde(default)]
    pub traits: Option<Fields>,
    #[serde(default)]
    pub options: Option<Fields>,
}

impl Group {
    /// Validates a group payload, groupId is mandatory
    pub fn from_payload(payload: &Fields) -> TrackerResult<Self> {
        let payload: GroupPayload = parse_payload(EventType::Group, payload)?;
        let group_id = payload.group_id
            .filter(|id| !id.is_empty())
            .ok_or(TrackerError::missing("groupId", EventType::Group))?;

        Ok(Self {
            group_id,
            traits: payload.traits,
            options: payload.options,
        })
    }

    /// Positional arguments, traits become {} when only options are given
    pub fn arguments(&self) -> Vec<serde_json::Value> {
        positional(vec!(
            Argument::given(self.group_id.as_str()),
            Argument::mapping(&self.traits),
            Argument::mapping(&self.options),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> Fields {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn group_id_is_required() {
        let err = Group::from_payload(&Fields::new()).unwrap_err();
        assert!(err.to_string().contains("missing groupId"));

        let err = Group::from_payload(&payload(json!({"traits": {"name": "Acme"}}))).unwrap_err();
        assert_eq!(err, TrackerError::missing("groupId", EventType::Group));
    }

    #[test]
    fn empty_group_id_is_missing() {
        let err = Group::from_payload(&payload(json!({"groupId": ""}))).unwrap_err();
        assert_eq!(err, TrackerError::missing("groupId", EventType::Group));
    }

    #[test]
    fn group_id_must_be_a_string() {
        let err = Group::from_payload(&payload(json!({"groupId": 12}))).unwrap_err();
        assert!(matches!(err, TrackerError::InvalidMetadata(_)));
    }

    #[test]
    fn traits_default_only_when_options_follow() {
        let group = Group::from_payload(&payload(json!({"groupId": "G1"}))).unwrap();
        assert_eq!(group.arguments(), vec!(json!("G1")));

        let group = Group::from_payload(&payload(json!({"groupId": "G1", "options": {"All": false}}))).unwrap();
        assert_eq!(group.arguments(), vec!(json!("G1"), json!({}), json!({"All": false})));
    }
}
