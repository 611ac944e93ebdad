//! Listener
//!
//! Accepts raw control connections and hands each one to an independent
//! session task. Sessions share no mutable state; the filesystem under the
//! server root is the only shared resource.

use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::session::handle_session;

pub struct Server {
    listener: TcpListener,
    config: Arc<ServerConfig>,
}

impl Server {
    /// Binds the control listener and ensures the server root exists.
    pub async fn new(config: ServerConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind(config.control_socket()).await?;
        info!("Server bound to {}", listener.local_addr()?);

        if let Err(e) = tokio::fs::create_dir_all(config.server_root_path()).await {
            warn!("Failed to create server root directory: {}", e);
        } else {
            info!("Server root directory: {}", config.server_root);
        }

        Ok(Self {
            listener,
            config: Arc::new(config),
        })
    }

    /// The address the control listener is bound to.
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept loop: one tokio task per control connection.
    pub async fn start(&self) {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    info!("Accepted connection from {}", addr);
                    let config = Arc::clone(&self.config);

                    // Spawn a task per client so the accept loop never blocks
                    tokio::spawn(async move {
                        handle_session(stream, addr, config).await;
                    });
                }
                Err(e) => {
                    error!("Error accepting connection: {}", e);
                }
            }
        }
    }
}
