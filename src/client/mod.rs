//! Connection lifecycle.
//!
//! [`Connection`] is the building block: one framed stream, the current
//! nick, and a read-dispatch-reply cycle. [`Client`] runs a connection to a
//! configured server on a tokio task, registers, joins the configured
//! channels after the welcome reply, and streams [`Event`](crate::Event)s
//! back until `Close`.

mod connection;
mod task;

pub use self::connection::{Connection, Frame};
pub use self::task::{Client, ClientHandle};
