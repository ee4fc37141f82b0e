use crate::config::{Config, Env};
use opentelemetry_sdk::propagation::TraceContextPropagator;
use std::env;
use tracing_stackdriver::CloudTraceConfiguration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,cohort_services=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Pretty output for local and test runs, Stackdriver JSON plus
/// OpenTelemetry for deployed environments.
pub fn init_tracing(config: &Config) -> anyhow::Result<()> {
    if matches!(config.environment(), Env::Local | Env::Test) {
        tracing_subscriber::registry()
            .with(env_filter())
            .with(tracing_subscriber::fmt::layer())
            .try_init()?;
        return Ok(());
    }

    // W3C trace-context, read back by the request span in `routes`.
    opentelemetry::global::set_text_map_propagator(TraceContextPropagator::new());

    let otel_layer = tracing_opentelemetry::layer();

    match env::var("GOOGLE_CLOUD_PROJECT") {
        Ok(project_id) => {
            let stackdriver_layer = tracing_stackdriver::layer()
                .with_cloud_trace(CloudTraceConfiguration { project_id });
            tracing_subscriber::registry()
                .with(env_filter())
                .with(otel_layer)
                .with(stackdriver_layer)
                .try_init()?;
        }
        Err(_) => {
            // Stackdriver JSON without Cloud Trace linking.
            tracing_subscriber::registry()
                .with(env_filter())
                .with(otel_layer)
                .with(tracing_stackdriver::layer())
                .try_init()?;
            tracing::warn!(
                "GOOGLE_CLOUD_PROJECT not set for {} environment, Cloud Trace linking disabled",
                config.environment()
            );
        }
    }

    Ok(())
}
