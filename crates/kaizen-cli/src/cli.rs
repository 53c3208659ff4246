mod ask;
pub(crate) mod opt;
mod prompt;
mod quiz;
mod status;
mod validate;

use crate::opt::{Cli, Commands};
use anyhow::{Error, anyhow};
use kaizen_config::ClientConfig;
use kaizen_config::api::ApiConfig;
use kaizen_utils::tracing::TracingConfig;
use tracing::level_filters::LevelFilter;

/// Reads the config file if one was given and lets command line arguments override it.
async fn client_config(cli: &Cli) -> Result<ClientConfig, Error> {
    let mut config = match &cli.config {
        Some(path) => kaizen_config::load(path).await?,
        None => {
            let base_url = cli
                .api
                .base_url
                .clone()
                .ok_or_else(|| anyhow!("Either --config or --base-url is required"))?;
            ClientConfig::new(ApiConfig::new(base_url))
        }
    };
    cli.api.clone().apply(&mut config.api);
    cli.quiz.clone().apply(&mut config.quiz)?;
    cli.assistant.clone().apply(&mut config.assistant)?;
    Ok(config)
}

pub(crate) async fn exec(cli: Cli) -> Result<(), Error> {
    let _guard = kaizen_utils::tracing::setup(
        TracingConfig::builder()
            .package(env!("CARGO_PKG_NAME"))
            .version(env!("CARGO_PKG_VERSION"))
            .sentry_dsn(cli.sentry_dsn.clone())
            .default_level(if cli.debug { LevelFilter::DEBUG } else { LevelFilter::WARN })
            .build(),
    )?;

    if let Commands::Validate(opt) = cli.command {
        return validate::validate(opt).await;
    }

    let config = client_config(&cli).await?;
    match cli.command {
        Commands::Status => status::status(&config).await,
        Commands::Quiz(opt) => quiz::quiz(opt, &config).await,
        Commands::Ask(opt) => ask::ask(opt, &config).await,
        Commands::Validate(_) => Ok(()),
    }
}
