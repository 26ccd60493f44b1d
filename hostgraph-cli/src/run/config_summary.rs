//! Config summary printed by [`run_with_config`](super::run_with_config) when
//! `config.verbose` is true.

use hostgraph::specialist::SpecialistSummary;

use crate::config::RunConfig;

/// One line per section, `key=value` pairs, stable order.
pub(crate) fn format_config_summary(
    config: &RunConfig,
    specialists: &[SpecialistSummary],
) -> String {
    let names: Vec<&str> = specialists.iter().map(|s| s.name.as_str()).collect();
    format!(
        "session id={}\nhttp timeout={}s connect_timeout={}s\nspecialists urls={} discovered={}",
        config.session_id,
        config.host.http_timeout.as_secs(),
        config.host.http_connect_timeout.as_secs(),
        config.host.specialist_urls.join(","),
        names.join(","),
    )
}

pub(crate) fn print_config_summary(config: &RunConfig, specialists: &[SpecialistSummary]) {
    for line in format_config_summary(config, specialists).lines() {
        eprintln!("[config] {}", line);
    }
}
