//! Immutable registry of function signatures

use super::error::{SignatureError, SignatureResult};
use crate::config::compile_time::parsing::MAX_PARAMETER_COUNT;
use crate::logging::codes;
use crate::types::FunctionSignature;
use std::collections::HashMap;

/// Function name to signature lookup, read-only once built.
#[derive(Debug, Clone)]
pub struct SignatureTable {
    signatures: HashMap<String, FunctionSignature>,
}

impl SignatureTable {
    /// Build a table, rejecting duplicate names and malformed parameter specs
    pub fn new(signatures: Vec<FunctionSignature>) -> SignatureResult<Self> {
        let mut map = HashMap::with_capacity(signatures.len());

        for signature in signatures {
            Self::check_signature(&signature)?;

            if map.contains_key(&signature.name) {
                let err = SignatureError::duplicate_function(&signature.name);
                crate::log_error!(err.error_code(), &err.to_string(), "function" => &signature.name);
                return Err(err);
            }
            map.insert(signature.name.clone(), signature);
        }

        crate::log_success!(
            codes::success::SIGNATURE_TABLE_BUILT,
            "Signature table built",
            "functions" => map.len()
        );

        Ok(Self { signatures: map })
    }

    /// Table holding the full trigger function catalogue
    pub fn standard() -> SignatureResult<Self> {
        Self::new(super::catalogue::trigger_functions())
    }

    fn check_signature(signature: &FunctionSignature) -> SignatureResult<()> {
        if signature.parameters.len() > MAX_PARAMETER_COUNT {
            let err = SignatureError::too_many_declared_parameters(
                &signature.name,
                signature.parameters.len(),
                MAX_PARAMETER_COUNT,
            );
            crate::log_error!(err.error_code(), &err.to_string());
            return Err(err);
        }

        for (position, spec) in signature.parameters.iter().enumerate() {
            if !spec.kind.is_joint() && spec.mandatory.has_part_bits() {
                let err =
                    SignatureError::joint_flags_on_single_kind(&signature.name, position, spec.kind);
                crate::log_error!(err.error_code(), &err.to_string());
                return Err(err);
            }
        }

        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&FunctionSignature> {
        self.signatures.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.signatures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Function names in sorted order
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.signatures.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &FunctionSignature> {
        self.signatures.values()
    }
}
