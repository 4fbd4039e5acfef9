mod broadcaster;
mod coordinator;
mod dispatcher;
mod game_service;
mod matchmaker;
mod server_config;
mod session;
mod session_registry;
mod transport;
mod web_server;
mod ws_handler;

use clap::Parser;
use common::config::ConfigManager;
use common::{log, logger};

use coordinator::SessionCoordinator;
use dispatcher::spawn_dispatcher;
use server_config::{ServerConfig, DEFAULT_CONFIG_PATH};
use web_server::{run_web_server, WebServerState};

#[derive(Parser)]
#[command(name = "tictactoe_server")]
struct Args {
    /// YAML config file; missing file means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: String,

    #[arg(long)]
    host: Option<String>,

    #[arg(long, env = "PORT")]
    port: Option<u16>,

    #[arg(long)]
    enforce_symbol_binding: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Server".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = ConfigManager::<_, ServerConfig>::from_yaml_file(&args.config);
    let config = config_manager
        .load()?
        .with_overrides(args.host, args.port, args.enforce_symbol_binding)?;
    log!("Loaded config from {}: {:?}", config_manager.source(), config);

    let addr = config.socket_addr()?;
    let coordinator = SessionCoordinator::new(config.enforce_symbol_binding);
    let (intents, dispatcher) = spawn_dispatcher(coordinator, config.intent_channel_capacity);

    let state = WebServerState {
        intents,
        client_channel_capacity: config.client_channel_capacity,
    };

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to listen for Ctrl+C");
        log!("Shutdown signal received");
    };

    run_web_server(addr, state, shutdown_signal).await?;

    dispatcher.abort();
    log!("Server shut down gracefully");

    Ok(())
}
