//! requires - upload Python dependency manifests to a dependency tracker.
//!
//! The pipeline behind `update-branch` and `update-tag` is a single blocking
//! pass:
//!
//! 1. [`discovery`] expands each `PATH` argument into manifest files
//! 2. [`normalize`] gives every file a relative URL under a shared root
//! 3. [`api`] reads, base64-encodes and uploads all files in one request

pub mod api;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod name;
pub mod normalize;
pub mod output;
pub mod rules;
pub mod site;

pub use api::{FileEntry, RequiresApi, Resource};
pub use cli::{Cli, Commands};
pub use config::ApiConfig;
pub use error::RequiresError;
pub use name::Name;
pub use normalize::{to_urls, ManifestFile};
