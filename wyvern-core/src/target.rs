//! Target language metadata.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Languages the transpiler can emit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    /// Kotlin, compiled with `kotlinc` into a runnable jar.
    #[default]
    Kotlin,
}

impl TargetLanguage {
    /// Returns the language identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Kotlin => "kotlin",
        }
    }

    /// Human-facing name, as used in progress messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            TargetLanguage::Kotlin => "Kotlin",
        }
    }

    /// Canonical source file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            TargetLanguage::Kotlin => "kt",
        }
    }

    /// Name of the archive the build tool produces in the output directory.
    pub fn archive_name(&self) -> &'static str {
        match self {
            TargetLanguage::Kotlin => "kotlin.jar",
        }
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kotlin" | "kt" => Ok(TargetLanguage::Kotlin),
            _ => Err(format!("unknown target language '{}', expected 'kotlin'", s)),
        }
    }
}
