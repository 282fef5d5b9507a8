//! Raw protocol line parsing.
//!
//! A line is decomposed into an optional prefix, a command, middle
//! parameters and an optional trailing text:
//!
//! ```text
//! [:prefix ]<command>[ params...][ :trailing]
//! ```

mod parse;
mod serialize;
mod types;

pub use self::parse::parse_line;
pub use self::types::{Command, ParsedMessage};
