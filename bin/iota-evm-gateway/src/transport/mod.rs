//! The two transports that front the shared [`gateway_tools::Dispatcher`]
//! (§1, §6.6): JSON-over-stdio for local AI clients, JSON-over-HTTP for
//! networked ones.

pub mod http;
pub mod stdio;
