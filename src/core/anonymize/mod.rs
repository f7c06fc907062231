//! Anonymisation mapping engine
//!
//! Converts sensitive names into stable pseudonymous identifiers and
//! owns the bidirectional mapping for one sanitisation run. The hasher
//! is pure; the mapping table is explicit, run-scoped state. No
//! ambient or static mutable lookup state exists anywhere, so
//! concurrent test runs cannot interfere.

pub mod hasher;
pub mod mapping;

pub use hasher::{hash_suffix, SUFFIX_SPACE};
pub use mapping::{MappingSnapshot, MappingTable};
