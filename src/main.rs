//! TinyFTP Server - Entry Point
//!
//! A small FTP-style file transfer server implementing a reduced command
//! subset (USER, PASS, XMKD, CWD, XPWD, EPRT, PORT, RETR, STOR, DELE, QUIT).

use log::{error, info};

use tinyftp_server::Server;
use tinyftp_server::config::ServerConfig;

#[tokio::main]
async fn main() {
    // Initialize the logger (env_logger picks up RUST_LOG environment variable)
    env_logger::init();

    let config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    info!("Launching FTP session server...");

    match Server::new(config).await {
        Ok(server) => server.start().await,
        Err(e) => {
            error!("Server startup failed: {}", e);
            std::process::exit(1);
        }
    }
}
