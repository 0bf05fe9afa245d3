use anyhow::{Context, Result};
use clap::Parser;
use project_interviewer::{create_router, AppState, Config, Interviewer};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Automated technical interviews about a student's project
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config/project-interviewer")]
    config: String,

    /// Override the bind address
    #[arg(long)]
    bind: Option<String>,

    /// Override the HTTP port
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut cfg = Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        cfg.service.http.bind = bind;
    }
    if let Some(port) = args.port {
        cfg.service.http.port = port;
    }

    info!("{} v{}", cfg.service.name, env!("CARGO_PKG_VERSION"));
    info!("LLM model: {} ({})", cfg.llm.model, cfg.llm.api_url);
    info!(
        "Interview: {} initial questions, up to {} follow-ups",
        cfg.interview.num_initial_questions, cfg.interview.num_followup_questions
    );

    let interviewer = Interviewer::from_config(&cfg)?;
    let state = AppState::new(interviewer, cfg.interview.num_followup_questions);
    let app = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app).await.context("HTTP server failed")?;

    Ok(())
}
