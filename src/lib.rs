pub mod config;
pub mod endpoint;
pub mod error;
pub mod protocol;
pub mod sandbox;
pub mod server;
pub mod session;
pub mod transfer;

pub use server::Server;
