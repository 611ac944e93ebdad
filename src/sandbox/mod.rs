//! Path sandbox
//!
//! Resolves relative paths against a session's root directory and enforces
//! containment.

pub mod operations;

pub use operations::{full_path, resolve};
