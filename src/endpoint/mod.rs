//! Data endpoint negotiation
//!
//! Decodes PORT and EPRT arguments into a connectable network endpoint.

pub mod parser;

pub use parser::{DataEndpoint, parse_eprt_arg, parse_port_arg};
