use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use contractsheet::ContractAssembler;
use contractsheet_server::config::{self, PORT_ENV};
use contractsheet_server::{AppState, logging, router};
use tokio::net::TcpListener;

#[derive(Parser, Debug)]
#[command(name = "contractsheet-server", version, about = "Contract xlsx generation service")]
struct Cli {
    /// Path to a config.toml (otherwise CONTRACTSHEET_CONFIG, then next to the binary)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen address, overrides config and PORT
    #[arg(long)]
    bind: Option<SocketAddr>,
    /// Template workbook, overrides config
    #[arg(long)]
    template: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Loaded before the subscriber exists; origin is logged once it does
    let (mut cfg, origin) = config::load_config(cli.config.as_deref())?;
    logging::init_tracing(&cfg.logging)?;
    tracing::info!(origin = %origin, "configuration loaded");

    config::apply_port_override(&mut cfg, std::env::var(PORT_ENV).ok().as_deref())?;
    if let Some(template) = cli.template {
        cfg.template.path = template;
    }
    let addr = cli.bind.unwrap_or_else(|| cfg.server.addr());

    let template = config::template_source(&cfg.template, &origin)?;
    tracing::info!(template = %template.describe(), "using contract template");
    let state = AppState::new(ContractAssembler::new(template, cfg.generator.clone()));
    let app = router(state);

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server successfully bound to {}", addr);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!("Port {} is already in use", addr.port());
            } else {
                tracing::error!("Failed to bind to {}: {}", addr, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;
    Ok(())
}
