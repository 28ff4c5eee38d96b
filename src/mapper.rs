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

/// Action type to analytics metadata table, for actions without meta.analytics

use crate::action::Action;
use crate::events::kind::EventType;
use crate::events::spec::AnalyticsMeta;

use std::collections::HashMap;

/// Router actions signalling a location change, tracked as page views
pub const ROUTER_LOCATION_ACTIONS: [&str; 4] = [
    "@@router/LOCATION_CHANGE",
    "@@router/UPDATE_LOCATION",
    "@@router/INIT_PATH",
    "@@router/UPDATE_PATH",
];

/// Convenience type: a mapping computed from the action itself
pub type MappingFn = Box<dyn Fn(&Action) -> Option<AnalyticsMeta> + Send + Sync>;

/// What an action type maps to
pub enum Mapping {
    Static(AnalyticsMeta),
    Dynamic(MappingFn),
}

/// Maps action types to analytics metadata
#[derive(Default)]
pub struct Mapper {
    entries: HashMap<String, Mapping>,
}

impl Mapper {
    /// An empty mapper: only meta.analytics is looked at
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds page views for router location changes
    pub fn with_router_pages(mut self) -> Self {
        for action_type in ROUTER_LOCATION_ACTIONS {
            self.insert(action_type, EventType::Page);
        }
        self
    }

    /// Maps an action type to fixed metadata
    pub fn insert<S: Into<String>, M: Into<AnalyticsMeta>>(&mut self, action_type: S, meta: M) -> &mut Self {
        self.entries.insert(action_type.into(), Mapping::Static(meta.into()));
        self
    }

    /// Maps an action type to metadata computed from the action
    pub fn insert_fn<S, F>(&mut self, action_type: S, mapping: F) -> &mut Self
    where
        S: Into<String>,
        F: Fn(&Action) -> Option<AnalyticsMeta> + Send + Sync + 'static,
    {
        self.entries.insert(action_type.into(), Mapping::Dynamic(Box::new(mapping)));
        self
    }

    /// Looks up the metadata for an action, if its type is mapped
    pub fn resolve(&self, action: &Action) -> Option<AnalyticsMeta> {
        match self.entries.get(&action.action_type)? {
            Mapping::Static(meta) => Some(meta.clone()),
            Mapping::Dynamic(mapping) => mapping(action),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::spec::EventSpec;
    use serde_json::json;

    #[test]
    fn empty_by_default() {
        assert!(Mapper::new().resolve(&Action::new("@@router/LOCATION_CHANGE")).is_none());
    }

    #[test]
    fn router_preset_maps_to_page() {
        let mapper = Mapper::new().with_router_pages();
        assert_eq!(mapper.len(), ROUTER_LOCATION_ACTIONS.len());
        assert_eq!(
            mapper.resolve(&Action::new("@@router/LOCATION_CHANGE")),
            Some(AnalyticsMeta::from(EventType::Page))
        );
        assert!(mapper.resolve(&Action::new("JOIN_TEAM")).is_none());
    }

    #[test]
    fn dynamic_mappings_see_the_action() {
        let mut mapper = Mapper::new();
        mapper.insert_fn("JOIN_TEAM", |action| {
            let team = action.rest.get("team")?.as_str()?.to_string();
            let spec = EventSpec::parse(&json!({"eventType": "group", "eventPayload": {"groupId": team}})).ok()?;
            Some(spec.into())
        });

        let action: Action = serde_json::from_value(json!({"type": "JOIN_TEAM", "team": "G1"})).unwrap();
        let meta = mapper.resolve(&action).unwrap();
        assert_eq!(meta.specs()[0].event_payload.get("groupId"), Some(&json!("G1")));
        assert!(mapper.resolve(&Action::new("JOIN_TEAM")).is_none());
    }
}
