use anyhow::Context;

use tracing::subscriber::set_global_default;

use tracing_log::LogTracer;

use tracing_subscriber::fmt::{self, format::FmtSpan, MakeWriter};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_FILTER: &str = "info";

/// Directives from `RUST_LOG`, or `default` when unset.
/// A malformed `RUST_LOG` is an error instead of being silently ignored.
pub fn env_filter(default: &str) -> anyhow::Result<EnvFilter> {
    parse_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok(), default)
}

fn parse_filter(directives: Option<String>, default: &str) -> anyhow::Result<EnvFilter> {
    match directives {
        Some(directives) => EnvFilter::try_new(&directives)
            .with_context(|| format!("Invalid {} directives: {}", EnvFilter::DEFAULT_ENV, directives)),
        None => EnvFilter::try_new(default).context("Invalid default log filter"),
    }
}

/// Install the process-wide subscriber. `log` records are routed through it too.
pub fn init<Sink>(filter: EnvFilter, sink: Sink) -> anyhow::Result<()>
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    LogTracer::init().context("Failed to route log records into tracing")?;

    let subscriber = fmt::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::NEW | FmtSpan::CLOSE)
        .with_writer(sink)
        .finish();

    set_global_default(subscriber).context("Failed to set global subscriber")
}
