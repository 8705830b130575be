//! Parameter grammar: kinds, mandatory flags and function signatures.

use super::value_type::ValueTypeSet;
use serde::Serialize;
use std::fmt;

/// What a parameter slot holds; each kind has its own quoting rule and validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// `/host/key[params]` item reference
    Query,
    /// Joint `sec|#num:time_shift`
    Scale,
    /// Seconds, optionally negative
    SecNeg,
    /// Seconds, zero allowed
    SecZero,
    /// Forecast fit function
    Fit,
    /// Forecast mode
    Mode,
    /// Decimal number with optional magnitude suffix
    NumSuffix,
    /// Comparison operator of `count`
    Operation,
    Percent,
    Pattern,
    /// Joint `period:period_shift` of the trend functions
    Period,
    NodataMode,
    /// String-matching operator of `find`
    Function,
}

impl ParameterKind {
    /// Joint kinds encode two values separated by a colon
    pub const fn is_joint(&self) -> bool {
        matches!(self, ParameterKind::Scale | ParameterKind::Period)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterKind::Query => "query",
            ParameterKind::Scale => "scale",
            ParameterKind::SecNeg => "sec_neg",
            ParameterKind::SecZero => "sec_zero",
            ParameterKind::Fit => "fit",
            ParameterKind::Mode => "mode",
            ParameterKind::NumSuffix => "num_suffix",
            ParameterKind::Operation => "operation",
            ParameterKind::Percent => "percent",
            ParameterKind::Pattern => "pattern",
            ParameterKind::Period => "period",
            ParameterKind::NodataMode => "nodata_mode",
            ParameterKind::Function => "function",
        }
    }
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which parts of a parameter must be supplied.
///
/// `PRESENT` concerns the slot itself. The two part bits only make sense for
/// joint kinds, where the text is split at the first colon.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MandatoryFlags(u8);

impl MandatoryFlags {
    pub const NONE: MandatoryFlags = MandatoryFlags(0x00);
    pub const PRESENT: MandatoryFlags = MandatoryFlags(0x01);
    pub const FIRST_PART_REQUIRED: MandatoryFlags = MandatoryFlags(0x02);
    pub const SECOND_PART_REQUIRED: MandatoryFlags = MandatoryFlags(0x04);

    pub const fn union(self, other: MandatoryFlags) -> Self {
        MandatoryFlags(self.0 | other.0)
    }

    pub const fn contains(&self, other: MandatoryFlags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn has_part_bits(&self) -> bool {
        self.0 & (Self::FIRST_PART_REQUIRED.0 | Self::SECOND_PART_REQUIRED.0) != 0
    }
}

impl fmt::Debug for MandatoryFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names = Vec::new();
        if self.contains(Self::PRESENT) {
            names.push("PRESENT");
        }
        if self.contains(Self::FIRST_PART_REQUIRED) {
            names.push("FIRST_PART_REQUIRED");
        }
        if self.contains(Self::SECOND_PART_REQUIRED) {
            names.push("SECOND_PART_REQUIRED");
        }
        if names.is_empty() {
            names.push("NONE");
        }
        write!(f, "MandatoryFlags({})", names.join(" | "))
    }
}

/// Declared kind and mandatoriness of one parameter position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParameterSpec {
    pub kind: ParameterKind,
    pub mandatory: MandatoryFlags,
}

impl ParameterSpec {
    pub const fn new(kind: ParameterKind, mandatory: MandatoryFlags) -> Self {
        Self { kind, mandatory }
    }

    /// Optional parameter
    pub const fn optional(kind: ParameterKind) -> Self {
        Self::new(kind, MandatoryFlags::NONE)
    }

    /// Mandatory parameter; for joint kinds the first part is required too
    pub const fn required(kind: ParameterKind) -> Self {
        let mandatory = if kind.is_joint() {
            MandatoryFlags::PRESENT.union(MandatoryFlags::FIRST_PART_REQUIRED)
        } else {
            MandatoryFlags::PRESENT
        };
        Self::new(kind, mandatory)
    }

    /// Mandatory joint parameter whose both parts are required
    pub const fn required_both_parts(kind: ParameterKind) -> Self {
        Self::new(
            kind,
            MandatoryFlags::PRESENT
                .union(MandatoryFlags::FIRST_PART_REQUIRED)
                .union(MandatoryFlags::SECOND_PART_REQUIRED),
        )
    }

    pub fn is_present_required(&self) -> bool {
        self.mandatory.contains(MandatoryFlags::PRESENT)
    }

    pub fn first_part_required(&self) -> bool {
        self.mandatory.contains(MandatoryFlags::FIRST_PART_REQUIRED)
    }

    pub fn second_part_required(&self) -> bool {
        self.mandatory.contains(MandatoryFlags::SECOND_PART_REQUIRED)
    }
}

/// Parameter grammar and accepted value types of one trigger function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub name: String,
    pub parameters: Vec<ParameterSpec>,
    pub allowed_value_types: ValueTypeSet,
}

impl FunctionSignature {
    pub fn new(
        name: &str,
        parameters: &[ParameterSpec],
        allowed_value_types: ValueTypeSet,
    ) -> Self {
        Self {
            name: name.to_string(),
            parameters: parameters.to_vec(),
            allowed_value_types,
        }
    }

    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn mandatory_count(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| p.is_present_required())
            .count()
    }
}
