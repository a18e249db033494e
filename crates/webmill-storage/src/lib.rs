//! Object storage for transcoded artifacts.
//!
//! This crate provides:
//! - Public-read upload of transcoded files to an S3 bucket
//! - An unauthenticated existence probe against the bucket's public URL form
//!
//! The probe deliberately uses a plain HTTP GET of `{public_base_url}/{key}`
//! rather than an authenticated HeadObject: presence of the public object is
//! exactly the condition the pipeline resumes against.

pub mod client;
pub mod error;
pub mod probe;

pub use client::{S3Client, StorageConfig};
pub use error::{StorageError, StorageResult};
pub use probe::{RemoteProbe, RemoteStatus};
