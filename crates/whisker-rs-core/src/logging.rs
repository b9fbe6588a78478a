//! Logging integration for whisker-rs.
//!
//! Provides a helper for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings).

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level filter is read from `settings.log_level`. In debug mode a
/// pretty, human-readable format is used; otherwise a structured JSON format
/// is used. Installing a second subscriber is a no-op.
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

/// Creates a tracing span covering a single render of a named template.
///
/// Embedder-facing: the engine itself does not name its templates, so it
/// never opens this span. Applications that track templates by name wrap
/// their render calls in it to correlate log events per render.
///
/// # Examples
///
/// ```
/// use whisker_rs_core::logging::render_span;
///
/// let span = render_span("greeting");
/// let _guard = span.enter();
/// tracing::info!("rendering");
/// ```
pub fn render_span(template_name: &str) -> tracing::Span {
    tracing::info_span!("render", template = template_name)
}
