pub mod api;
pub mod cli;
pub mod clients;
pub mod config;
pub mod db;
pub mod domain;
pub mod entities;
pub mod models;
pub mod services;
pub mod state;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
pub use config::Config;

fn init_tracing(config: &Config) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.general.log_level));

    // Logs go to stderr so command output on stdout stays machine-readable.
    let (text_layer, json_layer) = if config.general.log_json {
        (None, Some(fmt::layer().json().with_writer(std::io::stderr)))
    } else {
        (Some(fmt::layer().with_writer(std::io::stderr)), None)
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(text_layer)
        .with(json_layer)
        .init();
}

pub async fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    config.validate()?;
    init_tracing(&config);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let prometheus_handle = if config.observability.metrics_enabled {
                use metrics_exporter_prometheus::PrometheusBuilder;
                let handle = PrometheusBuilder::new()
                    .install_recorder()
                    .context("Failed to install Prometheus recorder")?;
                info!("Prometheus metrics recorder initialized");
                Some(handle)
            } else {
                None
            };

            cli::cmd_serve(config, prometheus_handle).await
        }

        Commands::Init => cli::cmd_init(),

        Commands::Location { query } => cli::cmd_location(config, &query.join(" ")).await,

        Commands::Lookup { domain, query } => {
            cli::cmd_lookup(config, &domain, &query.join(" ")).await
        }

        Commands::Purge { query } => cli::cmd_purge(&config, &query.join(" ")).await,
    }
}
