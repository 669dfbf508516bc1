//! MCP wire types.

pub mod capabilities;
pub mod error;
pub mod message;
pub mod request;
pub mod response;

pub use capabilities::*;
pub use error::*;
pub use message::*;
pub use request::*;
pub use response::*;
