//! Module `engine`
//!
//! Streams file bytes between a local file and an outbound data connection,
//! in either direction. Transfers run synchronously as part of handling
//! RETR/STOR; there is no background execution inside a session.

use log::{error, info};
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::endpoint::DataEndpoint;
use crate::error::TransferError;

/// Copy buffer size for both transfer directions.
pub const BUFFER_SIZE: usize = 4096;

/// Streams the file at `path` to an outbound connection to `endpoint`.
///
/// The caller has already verified the file exists; any I/O failure here
/// (connection refused, disk error) is a `TransferError` and leaves the
/// control connection usable.
pub async fn retrieve(endpoint: &DataEndpoint, path: &Path) -> Result<u64, TransferError> {
    let mut data_stream = connect(endpoint).await?;
    let mut file = File::open(path).await?;

    let mut buffer = [0u8; BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let n = file.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        data_stream.write_all(&buffer[..n]).await?;
        total_bytes += n as u64;
    }

    data_stream.flush().await?;
    data_stream.shutdown().await?;

    info!(
        "Sent {} ({} bytes) to {}",
        path.display(),
        total_bytes,
        endpoint.socket_addr()
    );
    Ok(total_bytes)
}

/// Streams bytes from an outbound connection to `endpoint` into a newly
/// created file at `path`, until the peer closes its end.
///
/// The caller has already verified nothing exists at `path`; this engine
/// never overwrites.
pub async fn store(endpoint: &DataEndpoint, path: &Path) -> Result<u64, TransferError> {
    let mut data_stream = connect(endpoint).await?;
    let mut file = File::create(path).await?;

    let mut buffer = [0u8; BUFFER_SIZE];
    let mut total_bytes = 0u64;

    loop {
        let n = data_stream.read(&mut buffer).await?;
        if n == 0 {
            break;
        }
        file.write_all(&buffer[..n]).await?;
        total_bytes += n as u64;
    }

    file.flush().await?;

    info!(
        "Received {} ({} bytes) from {}",
        path.display(),
        total_bytes,
        endpoint.socket_addr()
    );
    Ok(total_bytes)
}

async fn connect(endpoint: &DataEndpoint) -> Result<TcpStream, TransferError> {
    match TcpStream::connect(endpoint.socket_addr()).await {
        Ok(stream) => Ok(stream),
        Err(e) => {
            error!(
                "Failed to open data connection to {}: {}",
                endpoint.socket_addr(),
                e
            );
            Err(TransferError::Io(e))
        }
    }
}
