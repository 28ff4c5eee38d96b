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

use segtrack::events::rejections::explain_rejection;

use clap::Parser;
use std::path::PathBuf;

/// Troubleshoots actions whose analytics metadata gets rejected
#[derive(Parser)]
#[command(name = "segtrack-check-action", version, about)]
struct Args {
    /// File holding a single JSON action (defaults to stdin)
    action: Option<PathBuf>,
}

pub fn main() {
    let args = Args::parse();
    let input = match &args.action {
        Some(path) => std::fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e)),
        None => std::io::read_to_string(std::io::stdin()).map_err(|e| format!("failed to read stdin: {}", e)),
    };

    let input = match input {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    /* Exit code 1 means the action would be rejected by the tracker */
    let explanations = explain_rejection(&input);
    if !explanations.is_empty() {
        println!("{}", explanations.join("\n"));
        std::process::exit(1);
    }
    println!("Action accepted.");
}
