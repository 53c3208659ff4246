use sentry::ClientInitGuard;
use sentry_tracing::EventFilter;
use std::borrow::Cow;
use thiserror::Error;
use tracing_core::{Level, LevelFilter};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use typed_builder::TypedBuilder;

#[derive(TypedBuilder, Debug)]
pub struct TracingConfig {
    // Set by the binary so the sentry release names the binary, not this crate
    pub package: &'static str,
    pub version: &'static str,
    #[builder(default)]
    pub sentry_dsn: Option<String>,
    #[builder(setter(into), default = String::from("dev"))]
    pub env: String,
    /// Directive used when `RUST_LOG` is not set.
    #[builder(default = LevelFilter::INFO)]
    pub default_level: LevelFilter,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    TracingInit(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps sentry alive; events are flushed when this is dropped.
pub struct TracingGuard {
    _sentry: Option<ClientInitGuard>,
}

pub fn setup(config: TracingConfig) -> Result<TracingGuard, Error> {
    let guard = config.sentry_dsn.clone().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: Some(Cow::Owned(format!("{}@{}", config.package, config.version))),
                environment: Some(Cow::Owned(config.env.clone())),
                ..Default::default()
            },
        ))
    });

    let sentry_layer = guard.as_ref().map(|_| {
        sentry_tracing::layer().event_filter(|md| match *md.level() {
            Level::ERROR => EventFilter::Event,
            Level::TRACE => EventFilter::Ignore,
            _ => EventFilter::Breadcrumb,
        })
    });

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(config.default_level.into())
                .from_env_lossy(),
        )
        .with(sentry_layer)
        .try_init()?;

    Ok(TracingGuard { _sentry: guard })
}
