//! Steam MCP Server — Steam Community search, details, and reviews as MCP tools.

pub mod config;
pub mod protocol;
pub mod tools;
pub mod transport;
pub mod types;

pub use config::{resolve_client_config, ConfigOverrides};
pub use protocol::ProtocolHandler;
pub use transport::StdioTransport;
