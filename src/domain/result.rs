//! Result type alias for Ironveil operations

use crate::domain::errors::IronveilError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, IronveilError>;
