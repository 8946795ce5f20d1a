mod app;
mod config;
mod domain;
mod infrastructure;
mod model;
mod pipeline;
mod web;

use anyhow::Result;
use infrastructure::{directories, logging, shutdown};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_config()?;
    let paths = directories::ensure_directories(&config.directories, &config.models)?;
    logging::init_tracing(&config, &paths)?;

    let (shutdown, _) = shutdown::Shutdown::new();
    shutdown::install_signal_handlers(shutdown.clone());

    let app = app::SpamMonitorApp::initialize(config, paths, shutdown)?;
    app.run().await
}
