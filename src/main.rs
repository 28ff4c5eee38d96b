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

use segtrack::action::Action;
use segtrack::clients::journal::Journal;
use segtrack::config;
use segtrack::logging::init_logger;
use segtrack::tracker::Tracker;

use clap::Parser;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::sync::Arc;
use serde_json;
use log;

/// Replays newline-delimited JSON actions through the tracker, printing
/// every analytics call on stdout as a [method, ...arguments] array
#[derive(Parser)]
#[command(name = "segtrack", version, about)]
struct Args {
    /// Configuration file (defaults to SEGTRACK_CONFIG, then the usual locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop at the first action with invalid analytics metadata
    #[arg(long)]
    strict: bool,

    /// Actions file, one JSON action per line (defaults to stdin)
    input: Option<PathBuf>,
}

/// Replay statistics, reported once the input is exhausted
#[derive(Default)]
struct Summary {
    actions: u64,
    calls: u64,
    rejected: u64,
    unreadable: u64,
}

fn replay(tracker: &Tracker, input: Box<dyn BufRead>, strict: bool) -> Result<Summary, String> {
    let mut summary = Summary::default();

    for (number, line) in input.lines().enumerate() {
        let line = line.map_err(|e| format!("failed to read input: {}", e))?;
        if line.trim().is_empty() {
            continue;
        }

        let action: Action = match serde_json::from_str(&line) {
            Ok(a) => a,
            Err(e) => {
                log::warn!("line {}: not an action, skipping: {}", number + 1, e);
                summary.unreadable += 1;
                continue;
            }
        };

        /* Terminal handler: the replay has no reducer, the action is simply dropped */
        let dispatched = tracker.dispatch(action, |_| ());
        summary.actions += 1;
        match dispatched.analytics {
            Ok(calls) => summary.calls += calls as u64,
            Err(e) => {
                summary.rejected += 1;
                if strict {
                    return Err(format!("line {}: {}", number + 1, e));
                }
            }
        }
    }

    Ok(summary)
}

fn main() {
    let args = Args::parse();

    /* Locate and parse the configuration file, see config.rs */
    let configuration = match config::get_configuration(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("failed to process configuration file: {}", e);
            std::process::exit(1);
        }
    };

    let _logger = match init_logger(&configuration.logging) {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("failed to start logger: {}", e);
            std::process::exit(1);
        }
    };

    let input: Box<dyn BufRead> = match &args.input {
        Some(path) => match File::open(path) {
            Ok(f) => Box::new(BufReader::new(f)),
            Err(e) => {
                log::error!("{}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let journal = Arc::new(Journal::new(std::io::stdout()));
    let tracker = Tracker::with_mapper(journal, configuration.tracker.mapper());

    match replay(&tracker, input, args.strict) {
        Ok(summary) => {
            log::info!(
                "replayed {} actions: {} calls, {} rejected, {} unreadable lines",
                summary.actions, summary.calls, summary.rejected, summary.unreadable,
            );
        },
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    }
}
