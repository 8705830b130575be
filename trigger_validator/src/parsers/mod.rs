//! Lexical parsers used by the validator
//!
//! Each parser either answers a full-match question or returns a structured
//! result; none of them allocate state that outlives a call.

pub mod function_call;
pub mod interval;
pub mod macros;
pub mod number;
pub mod pattern;
pub mod period;
pub mod query;
pub mod relative_time;

pub use function_call::{parse_call, CallParseError, CallParseResult, FunctionCall};
pub use interval::SimpleInterval;
pub use macros::MacroMatcher;
pub use period::JointParts;
pub use query::{QueryParser, QueryReference};
pub use relative_time::{RelativeTimeToken, RelativeTokenKind};
