//! Shared payload types and conventions for the Nuxstage staging pipeline.
//!
//! This crate is pure data: serde types for the bound-service documents the
//! host framework hands us, the closed set of supported database systems,
//! canonical default values, and the staged-tree path layout. Decision
//! logic lives in the `nuxstage` crate.

pub mod defaults;
pub mod paths;
pub mod types;

pub use types::{
    DatabaseConfig, DatabaseSystem, DatabaseTemplate, ServiceBinding, ServiceCredentials,
    StagingConfig,
};
