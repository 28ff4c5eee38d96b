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
use crate::clients::AnalyticsClient;
use crate::error::TrackerResult;
use crate::events::alias::Alias;
use crate::events::group::Group;
use crate::events::identify::Identify;
use crate::events::kind::EventType;
use crate::events::page::Page;
use crate::events::spec::EventSpec;
use crate::events::track::Track;

use serde_json;

/// Convenience enum: a validated call for any event kind
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Track(Track),
    Identify(Identify),
    Page(Page),
    Group(Group),
    Alias(Alias),
    Reset,
}

impl Call {
    /// Validates a spec into a call, using the action for fallbacks
    pub fn from_spec(spec: &EventSpec, action: &Action) -> TrackerResult<Self> {
        let payload = &spec.event_payload;
        Ok(match spec.event_type {
            EventType::Track => Call::Track(Track::from_payload(payload, &action.action_type)?),
            EventType::Identify => Call::Identify(Identify::from_payload(payload)?),
            EventType::Page => Call::Page(Page::from_payload(payload)?),
            EventType::Group => Call::Group(Group::from_payload(payload)?),
            EventType::Alias => Call::Alias(Alias::from_payload(payload)?),
            EventType::Reset => Call::Reset,
        })
    }

    pub fn event_type(&self) -> EventType {
        match self {
            Call::Track(_) => EventType::Track,
            Call::Identify(_) => EventType::Identify,
            Call::Page(_) => EventType::Page,
            Call::Group(_) => EventType::Group,
            Call::Alias(_) => EventType::Alias,
            Call::Reset => EventType::Reset,
        }
    }

    /// The positional arguments the client method receives
    pub fn arguments(&self) -> Vec<serde_json::Value> {
        match self {
            Call::Track(track) => track.arguments(),
            Call::Identify(identify) => identify.arguments(),
            Call::Page(page) => page.arguments(),
            Call::Group(group) => group.arguments(),
            Call::Alias(alias) => alias.arguments(),
            Call::Reset => vec!(),
        }
    }

    /// The call as a [method, ...arguments] array
    pub fn to_line(&self) -> serde_json::Value {
        call_line(self.event_type(), self.arguments())
    }

    /// Hands the call over to the matching client method
    pub fn send(&self, client: &dyn AnalyticsClient) {
        match self {
            Call::Track(track) => client.track(track),
            Call::Identify(identify) => client.identify(identify),
            Call::Page(page) => client.page(page),
            Call::Group(group) => client.group(group),
            Call::Alias(alias) => client.alias(alias),
            Call::Reset => client.reset(),
        }
    }
}

/// Builds a [method, ...arguments] array, the way call stubs record them
pub fn call_line(event_type: EventType, arguments: Vec<serde_json::Value>) -> serde_json::Value {
    let mut line = vec!(serde_json::Value::String(event_type.as_str().into()));
    line.extend(arguments);
    serde_json::Value::Array(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reset_ignores_its_payload() {
        let spec = EventSpec::parse(&json!({"eventType": "reset", "eventPayload": {"userId": "u1"}})).unwrap();
        let call = Call::from_spec(&spec, &Action::new("LOG_OUT")).unwrap();
        assert_eq!(call.to_line(), json!(["reset"]));
    }

    #[test]
    fn lines_start_with_the_method() {
        let spec = EventSpec::parse(&json!({"eventType": "group", "eventPayload": {"groupId": "G1"}})).unwrap();
        let call = Call::from_spec(&spec, &Action::new("JOIN_TEAM")).unwrap();
        assert_eq!(call.event_type(), EventType::Group);
        assert_eq!(call.to_line(), json!(["group", "G1"]));
    }
}
