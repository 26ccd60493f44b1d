//! Run config: specialist endpoints, timeouts, session and output flags. Filled from env / .env.
//!
//! Interacts with [`RunOptions`](super::RunOptions), [`run_with_config`](crate::run_with_config)
//! and hostgraph's [`HostConfig`].

use hostgraph::HostConfig;

use super::RunOptions;

/// Error type used for config loading and runs.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Session id used when none is given.
pub const DEFAULT_SESSION_ID: &str = "cli";

/// Run config for one CLI invocation.
#[derive(Clone, Debug)]
pub struct RunConfig {
    /// Specialist URLs and HTTP timeouts.
    pub host: HostConfig,
    /// Session every message of this invocation belongs to. Env `SESSION_ID`, default `cli`.
    pub session_id: String,
    /// When true, print stage enter/exit and a config summary to stderr.
    pub verbose: bool,
    /// When true, print the fragments as one JSON document instead of text.
    pub json: bool,
}

impl RunConfig {
    /// Fill config from env vars (and .env). Requires `dotenv::dotenv().ok()` or load inside `run()`.
    ///
    /// Specialist and timeout variables are documented on [`HostConfig::from_env`].
    pub fn from_env() -> Result<Self, Error> {
        let host = HostConfig::from_env()?;
        let session_id =
            std::env::var("SESSION_ID").unwrap_or_else(|_| DEFAULT_SESSION_ID.to_string());
        Ok(Self {
            host,
            session_id,
            verbose: false,
            json: false,
        })
    }

    /// Apply optional overrides from `RunOptions` to this config.
    ///
    /// Only set fields in `options` override; specialist URLs replace the env list
    /// when at least one is given.
    pub fn apply_options(&mut self, options: &RunOptions) {
        if let Some(session_id) = &options.session_id {
            self.session_id = session_id.clone();
        }
        self.host = self
            .host
            .clone()
            .with_specialist_urls(options.specialist_urls.clone());
        self.verbose = options.verbose;
        self.json = options.json;
    }
}
