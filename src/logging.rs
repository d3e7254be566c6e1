// ==========================================
// Logging setup
// ==========================================
// tracing + tracing-subscriber
// Level from RUST_LOG, format from CYCLE_RADAR_LOG_FORMAT
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Set to "json" for one JSON object per line
pub const LOG_FORMAT_ENV: &str = "CYCLE_RADAR_LOG_FORMAT";

/// Initialize logging
///
/// # Environment
/// - RUST_LOG: filter (default: info)
///   e.g. RUST_LOG=debug or RUST_LOG=cycle_radar=trace
/// - CYCLE_RADAR_LOG_FORMAT=json: structured output
///
/// Logs go to stderr so stdout stays free for report output.
///
/// # Example
/// ```no_run
/// use cycle_radar::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if let Err(e) = result {
        eprintln!("logging already initialized: {}", e);
    }
}

/// Test logging: debug level, captured by the test harness
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
