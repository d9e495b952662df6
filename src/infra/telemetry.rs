use std::io;
use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

pub const METRIC_API_REQUESTS: &str = "postboard_api_requests_total";
pub const METRIC_API_FAILURES: &str = "postboard_api_failures_total";
pub const METRIC_SELECTION_SUPERSEDED: &str = "postboard_selection_superseded_total";

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install a global tracing subscriber using the provided logging settings.
///
/// Logs go to stderr so stdout stays free for the page output.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_writer(io::stderr)
            .with_current_span(true)
            .with_span_list(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(io::stderr)
            .with_target(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| {
            InfraError::telemetry(format!("failed to install tracing subscriber: {err}"))
        })
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            METRIC_API_REQUESTS,
            Unit::Count,
            "Total number of requests issued against the posts resource."
        );
        describe_counter!(
            METRIC_API_FAILURES,
            Unit::Count,
            "Total number of posts requests that failed or returned a non-success status."
        );
        describe_counter!(
            METRIC_SELECTION_SUPERSEDED,
            Unit::Count,
            "Total number of post detail responses dropped because a newer selection was issued."
        );
    });
}
