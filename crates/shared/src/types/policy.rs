//! Compile policy shared by configuration and the compilation orchestrator.

use serde::{Deserialize, Serialize};

/// Decides which documents of a batch are handed to the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompilePolicy {
    /// Compile every requested document.
    AlwaysRecompile,
    /// Compile only documents missing from the class cache.
    SkipCompiled,
}

impl CompilePolicy {
    /// Returns the configuration name of the policy.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AlwaysRecompile => "always_recompile",
            Self::SkipCompiled => "skip_compiled",
        }
    }
}

impl std::fmt::Display for CompilePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CompilePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "always_recompile" => Ok(Self::AlwaysRecompile),
            "skip_compiled" => Ok(Self::SkipCompiled),
            other => Err(format!("unknown compile policy: {other}")),
        }
    }
}
