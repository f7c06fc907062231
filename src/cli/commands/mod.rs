//! Command implementations

pub mod init;
pub mod process;
pub mod seed;
pub mod serve;
pub mod validate;
