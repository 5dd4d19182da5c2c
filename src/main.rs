use std::sync::Arc;

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use spraychart::api::routes::{router, ApiState};
use spraychart::config::Config;
use spraychart::error::Result;

#[tokio::main]
async fn main() {
    let cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .init();

    if let Err(e) = run(cfg).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: Config) -> Result<()> {
    if !cfg.csv_path.exists() {
        // Requests re-read the file, so the server can start before the
        // dataset lands; every request will 500 until it does.
        warn!(path = %cfg.csv_path.display(), "batted-ball CSV not found at startup");
    }

    let state = ApiState {
        csv_path: Arc::new(cfg.csv_path.clone()),
    };
    let app = router(state);

    let bind_addr = format!("0.0.0.0:{}", cfg.api_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(
        "HTTP API listening on {bind_addr}, dataset at {}",
        cfg.csv_path.display()
    );

    axum::serve(listener, app).await?;

    Ok(())
}
