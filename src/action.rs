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

/// Actions flowing through the dispatch pipeline

use crate::events::common::Fields;

use serde::{Deserialize, Serialize};
use serde_json;

/// A dispatched action: a type discriminator, optional metadata, and
/// whatever else the application put on it (carried through untouched)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Action {
    #[serde(rename = "type")]
    pub action_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Fields>,
    #[serde(flatten)]
    pub rest: Fields,
}

impl Action {
    /// A bare action with just a type
    pub fn new<S: Into<String>>(action_type: S) -> Self {
        Self {
            action_type: action_type.into(),
            meta: None,
            rest: Fields::new(),
        }
    }

    /// Attaches analytics metadata (meta.analytics), keeping other meta keys
    pub fn with_analytics<V: Into<serde_json::Value>>(mut self, analytics: V) -> Self {
        self.meta.get_or_insert_with(Fields::new)
            .insert("analytics".into(), analytics.into());
        self
    }

    /// Raw meta.analytics, if any (null counts as absent)
    pub fn analytics(&self) -> Option<&serde_json::Value> {
        self.meta.as_ref()
            .map(|meta| meta.get("analytics"))
            .flatten()
            .filter(|analytics| !analytics.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_unknown_fields() {
        let raw = json!({"type": "ADD_TODO", "payload": {"text": "milk"}, "meta": {"optimistic": true}});
        let action: Action = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(action.action_type, "ADD_TODO");
        assert!(action.analytics().is_none());
        assert_eq!(serde_json::to_value(&action).unwrap(), raw);
    }

    #[test]
    fn null_analytics_is_absent() {
        let action: Action = serde_json::from_value(json!({"type": "X", "meta": {"analytics": null}})).unwrap();
        assert!(action.analytics().is_none());
    }

    #[test]
    fn with_analytics_preserves_other_meta() {
        let action: Action = serde_json::from_value(json!({"type": "X", "meta": {"optimistic": true}})).unwrap();
        let action = action.with_analytics("page");
        assert_eq!(action.analytics(), Some(&json!("page")));
        assert_eq!(action.meta.unwrap().get("optimistic"), Some(&json!(true)));
    }
}
