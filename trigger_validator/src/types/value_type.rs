//! Item value types and the sets of them that a function accepts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type of the values collected by an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Float,
    #[serde(alias = "uint")]
    UInt64,
    #[serde(alias = "str")]
    String,
    Text,
    Log,
}

impl ValueType {
    pub const ALL: [ValueType; 5] = [
        ValueType::Float,
        ValueType::UInt64,
        ValueType::String,
        ValueType::Text,
        ValueType::Log,
    ];

    /// Name shown to users in value type error messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ValueType::Float => "Numeric (float)",
            ValueType::UInt64 => "Numeric (unsigned)",
            ValueType::String => "Character",
            ValueType::Text => "Text",
            ValueType::Log => "Log",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::UInt64 => "uint64",
            ValueType::String => "string",
            ValueType::Text => "text",
            ValueType::Log => "log",
        }
    }

    /// Parse a value type from a name or the numeric item value type id
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "float" | "0" => Some(ValueType::Float),
            "str" | "string" | "char" | "character" | "1" => Some(ValueType::String),
            "log" | "2" => Some(ValueType::Log),
            "uint" | "uint64" | "unsigned" | "3" => Some(ValueType::UInt64),
            "text" | "4" => Some(ValueType::Text),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ValueType::Float | ValueType::UInt64)
    }

    const fn bit(self) -> u8 {
        match self {
            ValueType::Float => 0x01,
            ValueType::UInt64 => 0x02,
            ValueType::String => 0x04,
            ValueType::Text => 0x08,
            ValueType::Log => 0x10,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Set of value types, stored as a bit mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueTypeSet(u8);

impl ValueTypeSet {
    pub const EMPTY: ValueTypeSet = ValueTypeSet(0);
    pub const ALL: ValueTypeSet = ValueTypeSet(0x1f);
    pub const NUMERIC: ValueTypeSet = ValueTypeSet::of(&[ValueType::Float, ValueType::UInt64]);
    pub const CHARACTER: ValueTypeSet =
        ValueTypeSet::of(&[ValueType::String, ValueType::Text, ValueType::Log]);
    pub const LOG: ValueTypeSet = ValueTypeSet::of(&[ValueType::Log]);

    pub const fn of(types: &[ValueType]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < types.len() {
            bits |= types[i].bit();
            i += 1;
        }
        ValueTypeSet(bits)
    }

    pub const fn contains(&self, value_type: ValueType) -> bool {
        self.0 & value_type.bit() != 0
    }

    pub const fn union(self, other: ValueTypeSet) -> Self {
        ValueTypeSet(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = ValueType> + '_ {
        ValueType::ALL.into_iter().filter(|t| self.contains(*t))
    }
}
