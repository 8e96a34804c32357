//! Multi-room chat presence server.
//!
//! Tracks room membership of WebSocket connections, relays chat messages to
//! rooms and pushes presence snapshots to every joined connection.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin madang-server
//! cargo run --bin madang-server -- --host 0.0.0.0 --port 3000 --rooms 한국,일본
//! cargo run --bin madang-server -- --require-auth --session tok-1=Alice
//! ```

use clap::Parser;
use madang_server::{
    config::{DEFAULT_ANONYMOUS_NAME, ServerConfig, parse_session_entry},
    ui::{AppState, Server},
};
use madang_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "madang-server")]
#[command(about = "Multi-room chat presence server with WebSocket broadcast", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Comma-separated list of rooms
    #[arg(long, value_delimiter = ',', default_value = "한국,일본,중국,미국")]
    rooms: Vec<String>,

    /// Room used when a client omits one (defaults to the first room)
    #[arg(long)]
    default_room: Option<String>,

    /// Reject presence and messages without an authenticated session
    #[arg(long)]
    require_auth: bool,

    /// Display name of anonymous connections that claim no nickname
    #[arg(long, default_value = DEFAULT_ANONYMOUS_NAME)]
    anonymous_name: String,

    /// Authenticated session as TOKEN=NICKNAME (repeatable)
    #[arg(long = "session", value_parser = parse_session_entry)]
    sessions: Vec<(String, String)>,

    /// Default log level (overridden by RUST_LOG)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

impl From<Args> for ServerConfig {
    fn from(args: Args) -> Self {
        Self {
            host: args.host,
            port: args.port,
            rooms: args.rooms,
            default_room: args.default_room,
            require_auth: args.require_auth,
            anonymous_name: args.anonymous_name,
            sessions: args.sessions,
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(&[env!("CARGO_PKG_NAME"), "madang-shared"], &args.log_level);

    let config = ServerConfig::from(args);
    let state = match AppState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };

    if let Err(e) = Server::new(state).run(config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
