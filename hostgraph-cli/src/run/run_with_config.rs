//! Run with an explicit [`RunConfig`]: discover specialists over A2A, then route.

use hostgraph::build_host_context;

use crate::config::{Error, RunConfig};

use super::{build_router, print_config_summary, run_host_router, Turn};

/// Discovers the specialists in `config.host`, builds the router and routes `messages`.
///
/// Unreachable specialists are skipped, so a run with none reachable still answers
/// with policy-only fragments.
pub async fn run_with_config(config: &RunConfig, messages: &[String]) -> Result<Vec<Turn>, Error> {
    let context = build_host_context(&config.host).await?;
    let router = build_router(&context.collaborators, context.sessions, config.verbose)?;
    if config.verbose {
        print_config_summary(config, &router.specialists());
    }
    run_host_router(&router, &config.session_id, messages).await
}
