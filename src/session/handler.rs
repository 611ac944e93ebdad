//! Module `handler`
//!
//! Drives one client's read-dispatch-reply loop over the control
//! connection. Each line is fully handled, including any data transfer,
//! before the next line is read; within one session there is no pipelining.

use log::{error, info, warn};
use std::net::SocketAddr;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::config::ServerConfig;
use crate::error::{ProtocolError, SessionError, reply_for};
use crate::protocol::replies::{self, Reply};
use crate::protocol::{Command, parse_command};
use crate::session::dispatcher::{SessionAction, handle_command};
use crate::session::state::Session;

const MAX_COMMAND_LENGTH: usize = 512;

/// Handles one FTP client session until QUIT, disconnect, or a control
/// connection fault.
pub async fn handle_session(stream: TcpStream, peer: SocketAddr, config: Arc<ServerConfig>) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut line = String::new();
    let mut session = Session::new();

    let greeting = Reply::new(replies::READY, "Service ready for new user");
    if let Err(e) = write_half.write_all(greeting.line().as_bytes()).await {
        error!("Failed to send greeting to {}: {}", peer, e);
        return;
    }
    let _ = write_half.flush().await;

    loop {
        line.clear();
        match reader.read_line(&mut line).await {
            Ok(0) => {
                // Peer disconnected; treated as session termination.
                info!("Connection closed by client {}", peer);
                break;
            }
            Ok(_) => {
                if line.len() > MAX_COMMAND_LENGTH {
                    warn!("Oversized command line from {}", peer);
                    let reply = reply_for(&SessionError::Protocol(ProtocolError::LineTooLong));
                    if write_half.write_all(reply.line().as_bytes()).await.is_err() {
                        break;
                    }
                    continue;
                }

                let command = parse_command(&line);
                match &command {
                    Command::Pass(_) => info!("Received from {}: PASS ****", peer),
                    other => info!("Received from {}: {:?}", peer, other),
                }

                let outcome = handle_command(&mut session, &command, &mut write_half, &config).await;

                if let Err(e) = write_half.write_all(outcome.reply.line().as_bytes()).await {
                    error!("Failed to write reply to {}: {}", peer, e);
                    break;
                }
                let _ = write_half.flush().await;

                if outcome.action == SessionAction::Close {
                    info!("Client {} requested to quit", peer);
                    break;
                }
            }
            Err(e) => {
                error!("Failed to read from {}: {}", peer, e);
                break;
            }
        }
    }

    info!("Client {} disconnected", peer);
}
