//! IRC message prefix (source) parsing.

mod types;

pub use self::types::{parse_identity, PrefixIdentity};
