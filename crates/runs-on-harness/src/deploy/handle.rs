// crates/runs-on-harness/src/deploy/handle.rs
// ============================================================================
// Module: Deployment Handle
// Description: Parameter bag describing one provisioning stage.
// Purpose: Render tool arguments and child environment for a stage.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! [`DeploymentHandle`] owns no cloud resources. It carries the working
//! directory, binary, variables, and child-process environment for a stage.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Plain Terraform binary, used for module fixtures.
pub const TERRAFORM_BINARY: &str = "terraform";

/// Terragrunt binary, used for live scenario stacks.
pub const TERRAGRUNT_BINARY: &str = "terragrunt";

// ============================================================================
// SECTION: Variables
// ============================================================================

/// Typed Terraform input variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum VarValue {
    /// String value, passed through verbatim.
    Str(String),
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// List of strings, rendered as an HCL list literal.
    List(Vec<String>),
}

impl VarValue {
    /// Renders the value for a `-var name=value` argument.
    #[must_use]
    pub fn render(&self) -> String {
        match self {
            Self::Str(value) => value.clone(),
            Self::Bool(value) => value.to_string(),
            Self::Int(value) => value.to_string(),
            // JSON string arrays are valid HCL list literals.
            Self::List(_) => serde_json::to_string(self).unwrap_or_else(|_| "[]".to_string()),
        }
    }
}

impl From<&str> for VarValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for VarValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for VarValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for VarValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<Vec<String>> for VarValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

/// Ordered variable mapping for a stage.
pub type VarMap = BTreeMap<String, VarValue>;

// ============================================================================
// SECTION: Subcommands
// ============================================================================

/// Provisioning-tool subcommands driven by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subcommand {
    /// `init`
    Init,
    /// `apply`
    Apply,
    /// `destroy`
    Destroy,
    /// `output -json`
    Output,
}

impl Subcommand {
    /// Returns the subcommand name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Apply => "apply",
            Self::Destroy => "destroy",
            Self::Output => "output",
        }
    }

    /// Returns true when the subcommand accepts `-var` arguments.
    const fn takes_vars(self) -> bool {
        matches!(self, Self::Apply | Self::Destroy)
    }
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Parameters for one provisioning stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentHandle {
    /// Directory the tool runs in.
    pub dir: PathBuf,
    /// Tool binary name or path.
    pub binary: String,
    /// Input variables.
    pub vars: VarMap,
    /// Environment set on the child process only.
    pub env: BTreeMap<String, String>,
    /// Pass `-no-color` to the tool.
    pub no_color: bool,
}

impl DeploymentHandle {
    /// Creates a handle with no variables and color disabled.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, binary: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            binary: binary.into(),
            vars: VarMap::new(),
            env: BTreeMap::new(),
            no_color: true,
        }
    }

    /// Replaces the variable mapping.
    #[must_use]
    pub fn with_vars(mut self, vars: VarMap) -> Self {
        self.vars = vars;
        self
    }

    /// Adds or overrides one variable.
    #[must_use]
    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<VarValue>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }

    /// Replaces the child-process environment.
    #[must_use]
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = env;
        self
    }

    /// Builds the argument list for a subcommand.
    #[must_use]
    pub fn args(&self, subcommand: Subcommand) -> Vec<String> {
        let mut args = vec![subcommand.as_str().to_string()];
        match subcommand {
            Subcommand::Init => args.push("-input=false".to_string()),
            Subcommand::Apply | Subcommand::Destroy => {
                args.push("-input=false".to_string());
                args.push("-auto-approve".to_string());
            }
            Subcommand::Output => args.push("-json".to_string()),
        }
        if self.no_color {
            args.push("-no-color".to_string());
        }
        if subcommand.takes_vars() {
            for (name, value) in &self.vars {
                args.push("-var".to_string());
                args.push(format!("{name}={}", value.render()));
            }
        }
        args
    }
}
