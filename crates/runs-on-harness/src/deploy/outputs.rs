// crates/runs-on-harness/src/deploy/outputs.rs
// ============================================================================
// Module: Stage Outputs
// Description: Parsed `output -json` results for a stage.
// Purpose: Provide scalar and list lookups that tolerate undeclared outputs.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`OutputSet`] is read-only and scoped to the stage that produced it.
//! Undeclared or null outputs read as an empty string or empty list.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::provisioner::DeployError;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Single entry of the `output -json` document.
#[derive(Debug, Deserialize)]
struct RawOutput {
    /// Output value.
    #[serde(default)]
    value: Value,
}

/// Outputs captured from a provisioned stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputSet {
    /// Output values keyed by name.
    values: BTreeMap<String, Value>,
}

impl OutputSet {
    /// Parses the document printed by `terraform output -json`.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::InvalidOutput`] when the document is not a JSON
    /// object of output entries.
    pub fn from_json(raw: &str) -> Result<Self, DeployError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let parsed: BTreeMap<String, RawOutput> =
            serde_json::from_str(trimmed).map_err(|err| DeployError::InvalidOutput(err.to_string()))?;
        Ok(Self {
            values: parsed.into_iter().map(|(name, raw)| (name, raw.value)).collect(),
        })
    }

    /// Builds an output set from raw values.
    #[must_use]
    pub fn from_values<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            values: entries.into_iter().map(|(name, value)| (name.into(), value)).collect(),
        }
    }

    /// Returns a scalar output, or `""` when undeclared or null.
    #[must_use]
    pub fn output(&self, name: &str) -> String {
        match self.values.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(value)) => value.clone(),
            Some(other) => other.to_string(),
        }
    }

    /// Returns a list output, or an empty list when undeclared or null.
    #[must_use]
    pub fn output_list(&self, name: &str) -> Vec<String> {
        match self.values.get(name) {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(value) => value.clone(),
                    other => other.to_string(),
                })
                .collect(),
            Some(Value::String(value)) if value.is_empty() => Vec::new(),
            Some(Value::String(value)) => vec![value.clone()],
            Some(other) => vec![other.to_string()],
        }
    }

    /// Returns the declared output names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}
