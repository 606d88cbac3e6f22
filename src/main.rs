//! job-scout — binary entrypoint. Runs one search pass and exits.

use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("job_scout=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = match job_scout::config::load_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    match job_scout::app::run_once(&cfg).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("job search failed: {e:#}");
            ExitCode::FAILURE
        }
    }
}
