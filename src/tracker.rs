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

/// The event translator: a pass-through middleware turning analytics
/// metadata on actions into analytics client calls

use crate::action::Action;
use crate::clients::AnalyticsClient;
use crate::error::TrackerResult;
use crate::events::any::Call;
use crate::events::spec::AnalyticsMeta;
use crate::mapper::Mapper;

use std::sync::Arc;
use log;

/// What came out of a dispatch: the downstream value, and how analytics went
#[derive(Debug)]
#[must_use = "the analytics outcome reports missing fields"]
pub struct Dispatched<R> {
    /// Whatever the next handler returned
    pub value: R,
    /// Number of client calls made, or why none were
    pub analytics: TrackerResult<usize>,
}

impl<R> Dispatched<R> {
    /// Surfaces an analytics failure as an error, dropping the downstream value
    pub fn into_result(self) -> TrackerResult<R> {
        self.analytics.map(|_| self.value)
    }
}

/// Intercepts actions and forwards analytics intents to the client
pub struct Tracker {
    client: Arc<dyn AnalyticsClient>,
    mapper: Mapper,
}

impl Tracker {
    /// A tracker reading meta.analytics only
    pub fn new(client: Arc<dyn AnalyticsClient>) -> Self {
        Self::with_mapper(client, Mapper::new())
    }

    /// A tracker which also maps action types without meta.analytics
    pub fn with_mapper(client: Arc<dyn AnalyticsClient>, mapper: Mapper) -> Self {
        Self { client, mapper }
    }

    pub fn client(&self) -> &Arc<dyn AnalyticsClient> {
        &self.client
    }

    /// Finds the analytics metadata for an action, meta.analytics first
    fn metadata(&self, action: &Action) -> TrackerResult<Option<AnalyticsMeta>> {
        match action.analytics() {
            Some(raw) => AnalyticsMeta::parse(raw).map(Some),
            None => Ok(self.mapper.resolve(action)),
        }
    }

    /// Validates everything an action asks for, without calling the client
    /// A single invalid spec rejects the whole action
    pub fn calls_for(&self, action: &Action) -> TrackerResult<Vec<Call>> {
        match self.metadata(action)? {
            Some(meta) => meta.specs().iter()
                .map(|spec| Call::from_spec(spec, action))
                .collect(),
            None => Ok(vec!()),
        }
    }

    /// Performs the client calls an action asks for, returns how many were made
    #[must_use = "the analytics outcome reports missing fields"]
    pub fn track(&self, action: &Action) -> TrackerResult<usize> {
        let calls = self.calls_for(action).map_err(|e| {
            log::warn!("not tracking {}: {}", action.action_type, e);
            e
        })?;

        for call in calls.iter() {
            log::debug!("{} -> {} {}", action.action_type, self.client, call.to_line());
            call.send(self.client.as_ref());
        }
        Ok(calls.len())
    }

    /// Middleware entry point: tracks the action, then hands it to the next
    /// handler unchanged, whatever the analytics outcome
    pub fn dispatch<R, F>(&self, action: Action, next: F) -> Dispatched<R>
    where
        F: FnOnce(Action) -> R,
    {
        let analytics = self.track(&action);
        Dispatched {
            value: next(action),
            analytics,
        }
    }

    /// Same as dispatch, but fails the way a throwing middleware would:
    /// on invalid metadata the next handler is not reached
    pub fn dispatch_strict<R, F>(&self, action: Action, next: F) -> TrackerResult<R>
    where
        F: FnOnce(Action) -> R,
    {
        self.track(&action)?;
        Ok(next(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::recorder::Recorder;
    use crate::error::TrackerError;
    use crate::events::kind::EventType;
    use serde_json::json;

    fn tracker() -> (Tracker, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::new());
        (Tracker::new(recorder.clone()), recorder)
    }

    #[test]
    fn no_metadata_no_calls() {
        let (tracker, recorder) = tracker();
        assert_eq!(tracker.track(&Action::new("ADD_TODO")), Ok(0));
        assert!(recorder.is_empty());
    }

    #[test]
    fn one_invalid_spec_suppresses_all_calls() {
        let (tracker, recorder) = tracker();
        let action = Action::new("JOIN_TEAM").with_analytics(json!(["page", "group"]));
        assert_eq!(tracker.track(&action), Err(TrackerError::missing("groupId", EventType::Group)));
        assert!(recorder.is_empty());
    }

    #[test]
    fn strict_dispatch_stops_the_chain() {
        let (tracker, _recorder) = tracker();
        let mut reached = false;
        let result = tracker.dispatch_strict(Action::new("JOIN_TEAM").with_analytics("group"), |_| reached = true);
        assert!(result.is_err());
        assert!(!reached);
    }
}
