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

pub mod blackhole;
pub mod journal;
pub mod recorder;

use crate::events::alias::Alias;
use crate::events::group::Group;
use crate::events::identify::Identify;
use crate::events::page::Page;
use crate::events::track::Track;

use std::fmt::Display;

/// The analytics client capability, all clients must implement this
/// Calls are fire-and-forget: delivery is the client's own business
pub trait AnalyticsClient: Display + Send + Sync {
    fn track(&self, track: &Track);
    fn identify(&self, identify: &Identify);
    fn page(&self, page: &Page);
    fn group(&self, group: &Group);
    fn alias(&self, alias: &Alias);
    fn reset(&self);
}
