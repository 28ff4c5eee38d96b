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

use segtrack::clients::recorder::Recorder;
use segtrack::{Action, Tracker};

use serde_json::json;
use std::sync::Arc;

const EVENT_TYPE: &str = "JOIN_TEAM";
const GROUP_ID: &str = "0PsRtFsHB0";

fn tracker() -> (Tracker, Arc<Recorder>) {
    let recorder = Arc::new(Recorder::new());
    (Tracker::new(recorder.clone()), recorder)
}

fn traits() -> serde_json::Value {
    json!({
        "email": "user@acme.org",
        "login": "acme",
        "name": "Acme",
        "type": "organization",
    })
}

fn options() -> serde_json::Value {
    json!({
        "All": false,
        "Mixpanel": true,
        "KISSmetrics": true,
    })
}

fn group_action(payload: serde_json::Value) -> Action {
    Action::new(EVENT_TYPE).with_analytics(json!({
        "eventType": "group",
        "eventPayload": payload,
    }))
}

#[test]
fn missing_group_id_is_rejected_in_both_forms() {
    let (tracker, recorder) = tracker();

    let explicit = Action::new(EVENT_TYPE).with_analytics(json!({"eventType": "group"}));
    let err = tracker.dispatch(explicit, |a| a).into_result().unwrap_err();
    assert!(err.to_string().contains("missing groupId"));

    let implicit = Action::new(EVENT_TYPE).with_analytics("group");
    let err = tracker.dispatch(implicit, |a| a).into_result().unwrap_err();
    assert!(err.to_string().contains("missing groupId"));

    assert!(recorder.is_empty());
}

#[test]
fn rejected_actions_still_reach_the_next_handler() {
    let (tracker, _recorder) = tracker();
    let action = Action::new(EVENT_TYPE).with_analytics("group");

    let dispatched = tracker.dispatch(action.clone(), |a| a);
    assert!(dispatched.analytics.is_err());
    assert_eq!(dispatched.value, action);
}

#[test]
fn passes_along_the_group_id() {
    let (tracker, recorder) = tracker();
    tracker.dispatch(group_action(json!({"groupId": GROUP_ID})), |_| ()).into_result().unwrap();
    assert_eq!(recorder.calls(), vec!(json!(["group", GROUP_ID])));
}

#[test]
fn passes_along_the_traits() {
    let (tracker, recorder) = tracker();
    let action = group_action(json!({"groupId": GROUP_ID, "traits": traits()}));
    tracker.dispatch(action, |_| ()).into_result().unwrap();
    assert_eq!(recorder.calls(), vec!(json!(["group", GROUP_ID, traits()])));
}

#[test]
fn passes_along_the_options() {
    let (tracker, recorder) = tracker();

    let action = group_action(json!({"groupId": GROUP_ID, "traits": traits(), "options": options()}));
    tracker.dispatch(action, |_| ()).into_result().unwrap();
    assert_eq!(recorder.get(0), Some(json!(["group", GROUP_ID, traits(), options()])));

    let no_traits = group_action(json!({"groupId": GROUP_ID, "options": options()}));
    tracker.dispatch(no_traits, |_| ()).into_result().unwrap();
    assert_eq!(recorder.get(1), Some(json!(["group", GROUP_ID, {}, options()])));
}
