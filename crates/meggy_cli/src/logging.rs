use tracing_subscriber::EnvFilter;

pub const LOG_ENV_VAR: &str = "MEGGY_LOG";
const DEFAULT_DIRECTIVE: &str = "warn";

/// First usable directive among the environment and the config file.
pub fn filter_directive(env_value: Option<&str>, configured: Option<&str>) -> String {
    [env_value, configured]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty() && EnvFilter::try_new(directive).is_ok())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Sends diagnostics to stderr so they never mix with responses on stdout.
pub fn init_logging(configured: Option<&str>) {
    let env_value = std::env::var(LOG_ENV_VAR).ok();
    let directive = filter_directive(env_value.as_deref(), configured);
    let filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true)
        .try_init();

    if installed.is_ok() {
        tracing::debug!(directive = %directive, "logging initialized");
    }
}
