//! Transfer engine
//!
//! Moves file bytes over a per-transfer data connection and performs the
//! file/directory mutations behind DELE and XMKD.

pub mod engine;
pub mod file_ops;

pub use engine::{BUFFER_SIZE, retrieve, store};
pub use file_ops::{delete, make_directories};
