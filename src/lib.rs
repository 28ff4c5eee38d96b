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

pub mod action;
pub mod clients;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod mapper;
pub mod tracker;

pub use action::Action;
pub use clients::AnalyticsClient;
pub use error::{TrackerError, TrackerResult};
pub use events::kind::EventType;
pub use events::spec::{AnalyticsMeta, EventSpec};
pub use mapper::Mapper;
pub use tracker::{Dispatched, Tracker};
