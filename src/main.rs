//! finboard main entry point

use anyhow::bail;
use clap::{Parser, Subcommand};
use finboard_api::start_server;
use finboard_client::{run_probe, ApiClient, ProbeExpectations, SourceRef};
use finboard_config::{default_config_path, Config, ConfigError, ConfigResult, ProbeConfig};
use finboard_core::ViewRegistry;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[derive(Parser, Debug)]
#[command(name = "finboard")]
#[command(version = "0.1.0")]
#[command(about = "A server-rendered dashboard for a transactions API", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Backend base URL, overrides `backend.base_url`
    #[arg(long, env = "BACKEND_URL")]
    backend_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, Default)]
enum Command {
    /// Serve the dashboard (default)
    #[default]
    Serve,
    /// Check that the backend serves the expected API
    Probe,
    /// Print a default configuration file
    InitConfig,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let command = args.command.unwrap_or_default();

    if let Command::InitConfig = command {
        print!("{}", Config::generate_default());
        return Ok(());
    }

    let (config, fallback) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            report_config_error(&e);
            bail!("Failed to load configuration from {}", args.config.display());
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.logging.level)).init();
    if let Some(e) = fallback {
        log::warn!("{}, using defaults", e);
        for hint in e.suggestions() {
            log::info!("  {}", hint);
        }
    }
    log::info!("Backend: {}", config.backend.base_url);

    let client = ApiClient::with_timeout(&config.backend.base_url, config.backend.timeout())?;

    let rt = Runtime::new()?;
    rt.block_on(async {
        match command {
            Command::Probe => probe(&client, &config.probe).await,
            _ => {
                let source: SourceRef = Arc::new(client);
                let registry = Arc::new(ViewRegistry::new(source, config.backend.fetch_limit));
                start_server(config, registry).await
            }
        }
    })
}

fn load_config(args: &Args) -> ConfigResult<(Config, Option<ConfigError>)> {
    let (config, fallback) = Config::load_or_default(&args.config)?;
    Ok((config.with_backend_url(args.backend_url.clone())?, fallback))
}

/// Runs before the logger exists, so it writes to stderr directly
fn report_config_error(e: &ConfigError) {
    eprintln!("[{}] {}", e.severity(), e);
    for hint in e.suggestions() {
        eprintln!("  - {}", hint);
    }
}

async fn probe(client: &ApiClient, probe: &ProbeConfig) -> anyhow::Result<()> {
    let expect = ProbeExpectations {
        expected_total: probe.expected_total,
        sample_id: probe.sample_id,
        expected_description: probe.expected_description.clone(),
        skip: probe.skip,
        limit: probe.limit,
        origin: probe.origin.clone(),
    };

    let report = run_probe(client, &expect).await;
    for outcome in &report.outcomes {
        println!(
            "[{}] {}: {}",
            if outcome.passed { "PASS" } else { "FAIL" },
            outcome.name,
            outcome.detail
        );
    }

    let failed = report.failures().count();
    if failed > 0 {
        bail!("{} of {} probe checks failed", failed, report.outcomes.len());
    }
    Ok(())
}
