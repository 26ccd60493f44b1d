//! Run entry points: load config from env, discover specialists, route each message.
//!
//! [`run`] uses env only; [`run_with_options`] applies [`RunOptions`] on top; both end
//! in [`run_with_config`].

mod common;
mod config_summary;
mod run_with_config;

pub(crate) use common::{build_router, run_host_router};
#[allow(unused_imports)]
pub(crate) use config_summary::{format_config_summary, print_config_summary};
pub use run_with_config::run_with_config;

use crate::config::{Error, RunConfig, RunOptions};

/// One routed message and the fragments the host produced for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    pub message: String,
    pub responses: Vec<String>,
}

/// Runs every message in order in one session, with config from env (and .env).
pub async fn run(messages: &[String]) -> Result<Vec<Turn>, Error> {
    run_with_options(messages, &RunOptions::default()).await
}

/// Like [`run`], with `options` applied over the env config.
pub async fn run_with_options(
    messages: &[String],
    options: &RunOptions,
) -> Result<Vec<Turn>, Error> {
    dotenv::dotenv().ok();
    let mut config = RunConfig::from_env()?;
    config.apply_options(options);
    run_with_config(&config, messages).await
}
