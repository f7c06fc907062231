//! Azure Blob Storage integration

pub mod blob;

pub use blob::BlobStoreClient;
