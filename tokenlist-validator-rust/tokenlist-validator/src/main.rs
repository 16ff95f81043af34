use anyhow::Context;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing::{debug, error, info};

use tokenlist_validator::app::report;
use tokenlist_validator::infrastructure::config::ValidatorConfig;
use tokenlist_validator::infrastructure::logger::Logger;
use tokenlist_validator::{RunOptions, ValidationService, ValidatorError};

/// Validates token list entries against the chains they are deployed on.
#[derive(Debug, Parser)]
#[command(name = "tokenlist-validator", version, about)]
struct Cli {
    /// Data directory holding one folder per entry
    #[arg(long)]
    datadir: Option<PathBuf>,

    /// Only validate these entries (comma separated folder names)
    #[arg(long, value_delimiter = ',')]
    tokens: Option<Vec<String>>,

    /// Check entry files and the compiled list only
    #[arg(long)]
    skip_chain_checks: bool,

    /// Also write the diagnostics to this JSON file
    #[arg(long)]
    report: Option<PathBuf>,

    /// JSON config file (defaults to $CONFIG_FILE or tokenlist.config.json)
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    log_level: Option<String>,
}

fn load_config(cli: &Cli) -> Result<ValidatorConfig, ValidatorError> {
    let mut config = match &cli.config {
        Some(path) => {
            dotenv::dotenv().ok();
            ValidatorConfig::load_from_file(path)?
        }
        None => ValidatorConfig::new()?,
    };

    if let Some(datadir) = &cli.datadir {
        config.datadir = datadir.clone();
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }

    config.ensure_valid()?;
    Ok(config)
}

async fn run(cli: &Cli, config: &ValidatorConfig) -> anyhow::Result<i32> {
    let service = ValidationService::new(config)?;
    let options = RunOptions {
        tokens: cli.tokens.clone(),
        skip_chain_checks: cli.skip_chain_checks,
    };

    let report = service.run(&options).await?;

    println!("{}", report::render(&report, std::io::stdout().is_terminal()));

    if let Some(path) = &cli.report {
        report::write_json_report(path, &report)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!("📝 Report written to {}", path.display());
    }

    Ok(report.outcome().exit_code())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            Logger::init("info", None);
            error!("❌ {}", e);
            std::process::exit(e.exit_code());
        }
    };

    Logger::init(&config.log_level, config.log_directory.clone());
    info!("🚀 Starting token list validation");
    debug!("Configuration: {}", config.summary());

    match run(&cli, &config).await {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            error!("❌ Validation aborted: {:#}", e);
            let code = e
                .downcast_ref::<ValidatorError>()
                .map(ValidatorError::exit_code)
                .unwrap_or(2);
            std::process::exit(code);
        }
    }
}
