use clap::Parser;
use ferrous_tunnel_api::{AppState, TunnelState};
use ferrous_tunnel_application::ports::TunnelSessionPort;
use ferrous_tunnel_domain::CliOverrides;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "ferrous-tunnel")]
#[command(version)]
#[command(about = "Ferrous Tunnel - DNS-over-HTTPS tunnel over a virtual interface")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Control API port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Control API bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DoH resolver URL (empty selects the default resolver)
    #[arg(short = 'r', long)]
    resolver: Option<String>,

    /// Strategy label reported with the tunnel status
    #[arg(short = 's', long)]
    strategy: Option<String>,

    /// Start the tunnel immediately
    #[arg(long)]
    autostart: bool,

    /// TUN device name
    #[arg(long)]
    interface: Option<String>,

    /// Adopt an already configured TUN file descriptor
    #[arg(long, value_name = "FD")]
    tun_fd: Option<i32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Write the effective configuration to FILE and exit
    #[arg(long, value_name = "FILE")]
    write_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        control_port: cli.port,
        bind_address: cli.bind.clone(),
        resolver_url: cli.resolver.clone(),
        strategy_id: cli.strategy.clone(),
        autostart: cli.autostart,
        interface_name: cli.interface.clone(),
        tun_fd: cli.tun_fd,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    if let Some(path) = cli.write_config.as_deref() {
        config.save(path)?;
        println!("Configuration written to {}", path);
        return Ok(());
    }

    bootstrap::init_logging(&config)?;

    info!("Starting Ferrous Tunnel v{}", env!("CARGO_PKG_VERSION"));

    let services = di::TunnelServices::new(&config)?;
    let session: Arc<dyn TunnelSessionPort> = services.session.clone();
    let tunnel_state = TunnelState::new(Arc::clone(&session));

    if config.tunnel.autostart {
        info!("Autostart enabled, starting tunnel");
        if let Err(e) = tunnel_state.start.execute(None, None).await {
            error!(error = %e, "Autostart failed, tunnel stays stopped");
        }
    }

    let app_state = AppState {
        tunnel: tunnel_state,
    };

    let web_addr: SocketAddr = format!(
        "{}:{}",
        config.server.bind_address, config.server.control_port
    )
    .parse()?;

    let shutdown = async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for shutdown signal");
            return;
        }
        info!("Shutdown signal received, stopping tunnel");
        session.stop().await;
    };

    server::start_web_server(web_addr, app_state, shutdown).await?;

    info!("Shutdown complete");
    Ok(())
}
