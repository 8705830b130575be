//! Core data model: item value types and the parameter grammar of a function signature

pub mod signature;
pub mod value_type;

pub use signature::{FunctionSignature, MandatoryFlags, ParameterKind, ParameterSpec};
pub use value_type::{ValueType, ValueTypeSet};
