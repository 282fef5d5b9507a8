//! Outbound commands the client writes upstream.

mod serialize;
mod types;

pub use types::OutboundCommand;
