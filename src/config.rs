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

use crate::events::spec::AnalyticsMeta;
use crate::mapper::Mapper;

use serde::{Serialize, Deserialize};
use std::fs::File;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use directories::ProjectDirs;
use thiserror::Error;
use serde_yaml;
use log;

/// Configuration defaults
pub mod defaults {
    pub fn logging_level() -> log::LevelFilter { log::LevelFilter::Info }

    pub fn tracker_router_pages() -> bool { false }
}

/// Errors met while locating or reading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("{path}: {source}")]
    Parse { path: String, source: serde_yaml::Error },
}

/// Logging block
#[derive(Serialize, Deserialize)]
pub struct Logging {
    #[serde(default = "defaults::logging_level")]
    pub level: log::LevelFilter,
}

impl Default for Logging {
    /// Builds a default logging block in case none is provided
    fn default() -> Self {
        return Self {
            level: defaults::logging_level(),
        }
    }
}

/// Tracker block
#[derive(Serialize, Deserialize)]
pub struct Tracker {
    /// Track router location changes as page views
    #[serde(default = "defaults::tracker_router_pages")]
    pub router_pages: bool,
    /// Action types mapped to analytics metadata, same shapes as meta.analytics
    #[serde(default)]
    pub mapper: HashMap<String, AnalyticsMeta>,
}

impl Default for Tracker {
    /// Builds a default tracker block in case none is provided
    fn default() -> Self {
        return Self {
            router_pages: defaults::tracker_router_pages(),
            mapper: HashMap::new(),
        }
    }
}

impl Tracker {
    /// Builds the mapper described by this block; explicit entries win over presets
    pub fn mapper(&self) -> Mapper {
        let mut mapper = match self.router_pages {
            true => Mapper::new().with_router_pages(),
            false => Mapper::new(),
        };
        for (action_type, meta) in self.mapper.iter() {
            mapper.insert(action_type.as_str(), meta.clone());
        }
        mapper
    }
}

/// The overall configuration file
#[derive(Serialize, Deserialize, Default)]
pub struct Configuration {
    /// A logging block
    #[serde(default)]
    pub logging: Logging,
    /// A tracker block
    #[serde(default)]
    pub tracker: Tracker,
}

/// Parse a configuration file given a path
fn parse_configuration_file(path: &Path) -> Result<Configuration, ConfigError> {
    let path_str = path.display().to_string();
    let file = File::open(path).map_err(|source| ConfigError::Io { path: path_str.clone(), source })?;
    let configuration = serde_yaml::from_reader(file).map_err(|source| ConfigError::Parse { path: path_str, source })?;
    Ok(configuration)
}

/// Locates and parses the configuration file, defaults apply when there is none
pub fn get_configuration(cmd_arg: Option<&Path>) -> Result<Configuration, ConfigError> {
    let given_location = cmd_arg
        .map(|p| p.to_path_buf())
        .or(std::env::var("SEGTRACK_CONFIG").map(|s| PathBuf::from(s)).ok());

    /* If a path was given, ignore all other options */
    if let Some(path) = given_location {
        return parse_configuration_file(path.as_path());
    }

    /* Otherwise, try and guess */
    let xdg_dirs = ProjectDirs::from("com", "withings", "segtrack");
    let inferred_locations = [
        Some(PathBuf::from("/etc/withings/segtrack.yml")),
        Some(PathBuf::from("/etc/withings/segtrack.yaml")),
        xdg_dirs.as_ref().map(|dirs| PathBuf::from(dirs.config_dir()).join("segtrack.yml")),
        xdg_dirs.as_ref().map(|dirs| PathBuf::from(dirs.config_dir()).join("segtrack.yaml")),
        std::env::current_dir().map(|p| p.join("segtrack.yml")).ok(),
        std::env::current_dir().map(|p| p.join("segtrack.yaml")).ok(),
    ];

    match inferred_locations.iter().flatten().find(|p| p.as_path().is_file()) {
        Some(path) => parse_configuration_file(path),
        None => {
            log::debug!("no configuration file found, using defaults");
            Ok(Configuration::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::events::kind::EventType;

    #[test]
    fn empty_file_means_defaults() {
        let configuration: Configuration = serde_yaml::from_str("{}").unwrap();
        assert_eq!(configuration.logging.level, log::LevelFilter::Info);
        assert!(!configuration.tracker.router_pages);
        assert!(configuration.tracker.mapper().is_empty());
    }

    #[test]
    fn parses_mapper_entries() {
        let configuration: Configuration = serde_yaml::from_str(concat!(
            "logging:\n",
            "  level: debug\n",
            "tracker:\n",
            "  router_pages: true\n",
            "  mapper:\n",
            "    JOIN_TEAM: group\n",
            "    SIGN_UP:\n",
            "      eventType: track\n",
            "      eventPayload:\n",
            "        event: Signed Up\n",
        )).unwrap();

        assert_eq!(configuration.logging.level, log::LevelFilter::Debug);
        let mapper = configuration.tracker.mapper();
        assert_eq!(mapper.len(), 6);
        assert_eq!(mapper.resolve(&Action::new("JOIN_TEAM")), Some(AnalyticsMeta::from(EventType::Group)));
        assert!(mapper.resolve(&Action::new("@@router/INIT_PATH")).is_some());
    }

    #[test]
    fn rejects_unknown_event_types() {
        let result = serde_yaml::from_str::<Configuration>("tracker:\n  mapper:\n    X: screen\n");
        assert!(result.is_err());
    }

    #[test]
    fn missing_given_file_is_an_error() {
        let result = get_configuration(Some(Path::new("/nonexistent/segtrack.yml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
