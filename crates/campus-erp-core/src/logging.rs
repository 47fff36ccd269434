//! Logging integration for the campus-erp client.
//!
//! Provides [`tracing`]-based subscriber setup driven by
//! [`Settings`](crate::settings::Settings) and helpers for per-request spans.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The filter is read from `settings.log_level`. In debug mode a pretty,
/// human-readable format is used; otherwise structured JSON.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one API call.
///
/// The span carries a generated request id and the request path so that
/// refresh/retry log lines correlate with the call that triggered them.
///
/// # Examples
///
/// ```
/// use campus_erp_core::logging::api_span;
///
/// let span = api_span("/master/classes/");
/// let _guard = span.enter();
/// tracing::info!("listing classes");
/// ```
pub fn api_span(path: &str) -> tracing::Span {
    let request_id = uuid::Uuid::new_v4();
    tracing::info_span!("api_request", id = %request_id, path = path)
}
