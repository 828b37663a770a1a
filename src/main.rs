mod auth;
mod config;
mod proxy;
mod server;
mod session;
mod types;
mod ui;
mod view;

use anyhow::Result;
use clap::Parser;

use crate::config::Settings;

#[derive(Debug, Parser)]
#[command(name = "signaldash", version)]
struct Cli {
    /// Override DASHBOARD_PORT
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut settings = Settings::load()?;
    if let Some(port) = cli.port {
        settings.port = port;
    }

    log::info!(
        "app.start bind={}:{} backend={} poll_secs={}",
        settings.host,
        settings.port,
        settings.backend_api_url,
        settings.poll_interval_secs
    );

    server::serve(settings).await
}
