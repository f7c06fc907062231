//! Pseudonymous identifier types
//!
//! Newtype wrappers for the generated identifiers that replace sensitive
//! names in the sanitised store. A [`Pseudonym`] is the only identifier
//! shape that ever leaves the process; original names stay inside the
//! run-scoped mapping table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category of a generated pseudonym
///
/// Each category has its own human-readable prefix and an independent
/// numeric suffix space: `Company_005` and `Pipeline_005` denote
/// unrelated entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PseudonymCategory {
    /// Operating company names (`client_name` column)
    Company,
    /// Pipeline asset names (`pipeline_name` column)
    Pipeline,
}

impl PseudonymCategory {
    /// The prefix used when forming pseudonyms of this category
    pub fn prefix(&self) -> &'static str {
        match self {
            PseudonymCategory::Company => "Company",
            PseudonymCategory::Pipeline => "Pipeline",
        }
    }
}

impl fmt::Display for PseudonymCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

/// Pseudonym newtype wrapper
///
/// A generated identifier of the form `<prefix>_<NNN>` with a
/// zero-padded three-digit suffix, e.g. `Company_042`.
///
/// # Examples
///
/// ```
/// use ironveil::domain::pseudonym::{Pseudonym, PseudonymCategory};
///
/// let p = Pseudonym::derived(PseudonymCategory::Company, 42);
/// assert_eq!(p.as_str(), "Company_042");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pseudonym(String);

impl Pseudonym {
    /// Creates a Pseudonym from an externally supplied identifier string
    ///
    /// Used at the gateway boundary where callers pass identifiers like
    /// `Company_137`. Only emptiness is rejected; an unknown identifier
    /// simply matches no stored rows.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Pseudonym cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Forms the pseudonym for a category and hash-derived suffix
    pub fn derived(category: PseudonymCategory, suffix: u16) -> Self {
        Self(format!("{}_{:03}", category.prefix(), suffix))
    }

    /// Returns the pseudonym as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Pseudonym {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Pseudonym {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Pseudonym {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Risk level assigned to an inspection finding
///
/// Also used for the boundary validation of gateway filters: an
/// out-of-enum value is rejected per-request, never silently ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Returns the lowercase wire/store representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
        }
    }

    /// All valid risk levels, in ascending severity order
    pub fn all() -> [RiskLevel; 4] {
        [
            RiskLevel::Low,
            RiskLevel::Medium,
            RiskLevel::High,
            RiskLevel::Critical,
        ]
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(RiskLevel::Low),
            "medium" => Ok(RiskLevel::Medium),
            "high" => Ok(RiskLevel::High),
            "critical" => Ok(RiskLevel::Critical),
            other => Err(format!(
                "Invalid risk level '{other}'. Must be one of: low, medium, high, critical"
            )),
        }
    }
}
