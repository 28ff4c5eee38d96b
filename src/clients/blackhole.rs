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

use crate::clients::AnalyticsClient;
use crate::events::alias::Alias;
use crate::events::group::Group;
use crate::events::identify::Identify;
use crate::events::page::Page;
use crate::events::track::Track;

use std::fmt::Display;

/// Does nothing, needs nothing
#[derive(Default)]
pub struct Blackhole {}

impl Display for Blackhole {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_str("blackhole")
    }
}

impl AnalyticsClient for Blackhole {
    fn track(&self, _track: &Track) {}
    fn identify(&self, _identify: &Identify) {}
    fn page(&self, _page: &Page) {}
    fn group(&self, _group: &Group) {}
    fn alias(&self, _alias: &Alias) {}
    fn reset(&self) {}
}
