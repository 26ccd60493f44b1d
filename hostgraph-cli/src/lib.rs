//! hostgraph-cli library: reusable host-router run logic for other crates.
//!
//! Reads specialist config from .env, discovers the specialists, runs each message
//! through the policy graph in one session and returns the fragments per message.
//!
//! ## Usage
//!
//! ```rust,no_run,ignore
//! let turns = hostgraph_cli::run(&["Find a hotel in Denver".to_string()]).await?;
//! for turn in &turns {
//!     for fragment in &turn.responses {
//!         println!("{}", fragment);
//!     }
//! }
//! ```

mod config;
mod middleware;
mod run;

pub use config::{Error, RunConfig, RunOptions};
pub use hostgraph::{HistoryEntry, HostState};
pub use run::{run, run_with_config, run_with_options, Turn};

#[cfg(test)]
mod tests;
