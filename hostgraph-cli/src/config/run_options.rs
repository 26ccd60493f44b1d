//! Optional overrides for a CLI run (command-line args or programmatic).
//!
//! Used by [`RunConfig::apply_options`](super::RunConfig::apply_options) and
//! [`run_with_options`](crate::run_with_options).

/// Optional overrides for a run: session, specialist URLs, output flags.
///
/// All fields are optional; only set fields override the base config (from env).
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Session id shared by every message of the run.
    pub session_id: Option<String>,
    /// Specialist base URLs; replace `SPECIALIST_URLS` / `*_AGENT_URL` when non-empty.
    pub specialist_urls: Vec<String>,
    /// Print stage enter/exit and a config summary to stderr.
    pub verbose: bool,
    /// Print JSON instead of text.
    pub json: bool,
}
