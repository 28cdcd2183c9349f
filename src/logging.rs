use tracing_subscriber::EnvFilter;

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "CDT_LOG";

/// Pick the filter directive: `CDT_LOG`, then `RUST_LOG`, then the config.
pub fn filter_directive(configured_level: &str) -> String {
    std::env::var(LOG_ENV)
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| format!("countdown_timers={}", configured_level.to_lowercase()))
}

/// Install the global subscriber. Logs go to stderr so they never mix with
/// command output.
pub fn init(configured_level: &str) {
    let filter = EnvFilter::try_new(filter_directive(configured_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
