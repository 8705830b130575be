//! Signature table: per-function parameter grammar and accepted value types

pub mod catalogue;
pub mod error;
pub mod table;

pub use catalogue::trigger_functions;
pub use error::{SignatureError, SignatureResult};
pub use table::SignatureTable;
