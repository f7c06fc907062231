//! Domain models and types for Ironveil.
//!
//! This module contains the core domain models, types, and business
//! rules: the fixed-schema inspection row, the pseudonym identifier
//! types, and the error hierarchy.
//!
//! # Type Safety
//!
//! Ironveil uses the newtype pattern for generated identifiers so that
//! pseudonyms and raw strings cannot be confused:
//!
//! ```rust
//! use ironveil::domain::{Pseudonym, PseudonymCategory};
//!
//! let p = Pseudonym::derived(PseudonymCategory::Company, 137);
//! assert_eq!(p.as_str(), "Company_137");
//! ```
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T>`] with [`IronveilError`]:
//!
//! ```rust,no_run
//! use ironveil::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = ironveil::config::load_config("ironveil.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod pseudonym;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{IronveilError, StoreError, TransferError};
pub use pseudonym::{Pseudonym, PseudonymCategory, RiskLevel};
pub use record::{CompanySummary, InspectionRecord, QueryFilter};
pub use result::Result;
