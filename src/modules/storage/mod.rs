//! Storage module for attachment files
//!
//! Provides a MinIO/S3-compatible client used by the report and submission
//! attachment stores.

mod object_store;

pub use object_store::ObjectStore;
