use clap::Parser;
use servicedex_api::AppState;
use servicedex_domain::CliOverrides;
use std::net::SocketAddr;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "servicedex")]
#[command(version)]
#[command(about = "Servicedex - Windows service inventory with enriched descriptions")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP API port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Service metadata JSON file
    #[arg(long, value_name = "FILE")]
    metadata: Option<String>,

    /// Disable audit log file
    #[arg(long, value_name = "FILE")]
    audit_log: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        bind_address: cli.bind.clone(),
        metadata_path: cli.metadata.clone(),
        audit_log_path: cli.audit_log.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config, cli.log_level.is_some());

    info!("Starting Servicedex v{}", env!("CARGO_PKG_VERSION"));

    let adapters = di::Adapters::new(&config).await?;
    let use_cases = di::UseCases::new(&config, &adapters);

    // The server still starts when the first enumeration fails; the next
    // list request retries it.
    match use_cases.refresh_services.execute().await {
        Ok(outcome) => info!(count = outcome.count, "Service cache warmed"),
        Err(e) => warn!(error = %e, "Initial service enumeration failed"),
    }

    let app_state = AppState {
        get_services: use_cases.get_services,
        refresh_services: use_cases.refresh_services,
        get_service_info: use_cases.get_service_info,
        enrich_service_info: use_cases.enrich_service_info,
        disable_service: use_cases.disable_service,
    };

    let web_addr: SocketAddr = format!("{}:{}", config.server.bind_address, config.server.port)
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid bind address: {}", e))?;

    server::start_web_server(web_addr, app_state, &config.server.allowed_origin).await?;

    info!("Server shutdown complete");
    Ok(())
}
