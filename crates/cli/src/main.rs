mod args;
mod report;

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use transmute_core::{
    load_config, load_config_from_env, validate_config, Capabilities, Config, Dispatcher,
    HandlerSet, Registry,
};

use args::{Args, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr so stdout carries only command output.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Args::parse()).await {
        Ok(code) => code,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<ExitCode> {
    let config = resolve_config(&args)?;
    let registry = Registry::builtin();

    match args.command {
        Command::List => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(registry.specs())?);
            } else {
                for spec in registry.specs() {
                    println!("{}", report::spec_line(spec));
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Capabilities => {
            let caps = Capabilities::detect(&config.converter).await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&caps)?);
            } else {
                for line in report::capability_lines(&caps) {
                    println!("{}", line);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Convert { file, label } => {
            let label = match label {
                Some(label) => label,
                None => registry
                    .default_spec()
                    .map(|spec| spec.label.to_string())
                    .context("No conversions are registered")?,
            };

            let caps = Capabilities::detect(&config.converter).await;
            let handlers = HandlerSet::new(&config.converter, caps);
            let dispatcher = Dispatcher::new(registry, handlers, config.dispatch);

            let result = dispatcher.convert(&file, &label).await;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", report::notification(&result));
            }

            Ok(if result.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

fn resolve_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => {
            debug!("No configuration file, using defaults and environment");
            load_config_from_env().context("Failed to read configuration from environment")?
        }
    };
    validate_config(&config).context("Configuration validation failed")?;
    Ok(config)
}
