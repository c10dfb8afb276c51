mod args;
mod config_store;
mod logger;
mod surface;

use anyhow::Context;
use args::{AnalyzeArgs, Cli, Command, OutputFormat};
use clap::Parser;
use colored::Colorize;
use config_store::ConfigStore;
use pantrycam_core::config::PipelineConfig;
use pantrycam_core::types::{AnalysisRequest, PipelineOutcome};
use pantrycam_engine::health::{probe_health, spawn_health_probe};
use pantrycam_engine::{HttpTransport, PipelineController, PipelineState, ReqwestTransport};
use std::process::ExitCode;
use std::sync::Arc;
use surface::TerminalSurface;
use url::Url;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    logger::setup_logging(cli.verbose);

    let cfg = resolve_config(&cli)?;

    match &cli.command {
        Command::Analyze(args) => run_analyze(cfg, args).await,
        Command::Health => run_health(cfg).await,
        Command::InitConfig { path } => {
            match path {
                Some(path) => {
                    let store = ConfigStore::at_path(path);
                    store.save(&cfg)?;
                    log::info!("wrote config to {}", store.path().display());
                }
                None => println!("{}", serde_json::to_string_pretty(&cfg)?),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Defaults, then the config file, then flag overrides.
fn resolve_config(cli: &Cli) -> anyhow::Result<PipelineConfig> {
    let mut cfg = match &cli.config {
        Some(path) => ConfigStore::at_path(path).load()?,
        None => PipelineConfig::default(),
    };

    if let Some(raw) = &cli.detection_endpoint {
        cfg.detection_endpoint =
            Url::parse(raw).with_context(|| format!("invalid --detection-endpoint: {raw}"))?;
    }
    if let Some(raw) = &cli.recipe_endpoint {
        cfg.recipe_endpoint =
            Url::parse(raw).with_context(|| format!("invalid --recipe-endpoint: {raw}"))?;
    }

    cfg.validate().context("invalid configuration")?;
    log::debug!("effective config: {cfg:?}");
    Ok(cfg)
}

async fn run_analyze(cfg: PipelineConfig, args: &AnalyzeArgs) -> anyhow::Result<ExitCode> {
    let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new()?);

    // Startup probe only informs the logs; the run does not wait for it.
    let _ = spawn_health_probe(transport.clone(), &cfg);

    let surface = Arc::new(TerminalSurface::new());
    let controller = PipelineController::new(cfg, transport, surface.clone());

    let mut req = AnalysisRequest::new();
    if let Some(prompt) = &args.prompt {
        req = req.with_prompt(prompt.clone());
    }
    if let Some(image) = &args.image {
        req = req.with_image(image.clone());
    }

    let outcome = controller
        .run_with_hook(req, |state| async move {
            if !matches!(state, PipelineState::Terminal) {
                eprintln!("{} {}", "->".cyan(), state.label());
            }
        })
        .await?;
    log::debug!("submit enabled again: {}", surface.submit_enabled());

    let rendered = match args.format {
        OutputFormat::Html => surface.last_markup(),
        OutputFormat::Json => serde_json::to_string_pretty(&outcome)?,
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("write output: {}", path.display()))?;
            log::info!("wrote {} output to {}", outcome.label(), path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(match outcome {
        PipelineOutcome::Failed { .. } | PipelineOutcome::ValidationFailed => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn run_health(cfg: PipelineConfig) -> anyhow::Result<ExitCode> {
    let transport = ReqwestTransport::new()?;
    let url = cfg.health_url()?;

    match probe_health(&transport, url.as_str()).await {
        Ok(()) => {
            println!("{} {url}", "ok".green());
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            println!("{} {url}: {e:#}", "unreachable".red());
            Ok(ExitCode::FAILURE)
        }
    }
}
