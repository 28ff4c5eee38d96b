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

use crate::action::Action;
use crate::events::any::Call;
use crate::events::spec::EventSpec;

use serde_json;

/// Attempts to turn a single spec into a call and explains why not
fn explain_spec_rejection(spec: &serde_json::Value, action: &Action) -> Option<String> {
    EventSpec::parse(spec)
        .and_then(|spec| Call::from_spec(&spec, action))
        .map_err(|e| e.to_string())
        .err()
}

/// Attempts to explain why an action's analytics metadata would be rejected,
/// with log-friendly messages; empty when the action would be tracked fine
pub fn explain_rejection(payload: &str) -> Vec<String> {
    let generic_json = match serde_json::from_str::<serde_json::Value>(payload) {
        Ok(j) => j,
        Err(_) => return vec!("invalid JSON structure".into())
    };

    let mut messages: Vec<String> = vec!();
    match serde_json::from_value::<Action>(generic_json) {
        Ok(action) => match action.analytics() {
            Some(serde_json::Value::Array(specs)) => {
                messages.extend(
                    specs.iter().enumerate()
                        .map(|(i, s)| explain_spec_rejection(s, &action).map(|e| (i, e)))
                        .flatten()
                        .map(|(i, e)| format!("spec {}: {}", i, e))
                );
            },
            Some(spec) => {
                if let Some(e) = explain_spec_rejection(spec, &action) {
                    messages.push(e);
                }
            },
            None => (),
        },
        Err(e) => {
            messages.push(e.to_string());
        }
    }

    messages.iter().enumerate()
        .map(|(i, m)| format!("({}) {}", i + 1, m))
        .collect::<Vec<String>>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_actions_have_no_explanation() {
        assert!(explain_rejection(r#"{"type": "NOOP"}"#).is_empty());
        assert!(explain_rejection(r#"{"type": "JOIN", "meta": {"analytics": {"eventType": "group", "eventPayload": {"groupId": "G1"}}}}"#).is_empty());
    }

    #[test]
    fn explains_invalid_json() {
        assert_eq!(explain_rejection("{"), vec!(String::from("invalid JSON structure")));
    }

    #[test]
    fn explains_missing_type() {
        let messages = explain_rejection(r#"{"meta": {}}"#);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("(1) missing field `type`"));
    }

    #[test]
    fn explains_each_failing_spec() {
        let messages = explain_rejection(r#"{"type": "JOIN", "meta": {"analytics": ["group", "page", {"eventType": "alias"}]}}"#);
        assert_eq!(messages, vec!(
            String::from("(1) spec 0: missing groupId for group event"),
            String::from("(2) spec 2: missing userId for alias event"),
        ));
    }

    #[test]
    fn explains_unknown_event_types() {
        let messages = explain_rejection(r#"{"type": "X", "meta": {"analytics": "screen"}}"#);
        assert_eq!(messages, vec!(String::from("(1) unknown analytics event type: screen")));
    }
}
