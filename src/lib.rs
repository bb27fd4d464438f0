// Library root: exposes internals for integration tests and embedding hosts.
// The binary entry point is src/main.rs.

pub mod answer;
pub mod channel;
pub mod config;
pub mod conversation;
pub mod error;
pub mod logger;
pub mod plugin;
