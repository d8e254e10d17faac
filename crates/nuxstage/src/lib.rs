//! Nuxstage - Core Library
//!
//! Staging pipeline for the bundled Nuxeo server: binding resolution,
//! configuration rendering, archive preparation and lifecycle script
//! generation.

pub mod archive;
pub mod conf;
pub mod database;
pub mod error;
pub mod scripts;
pub mod stager;

pub use error::{Result, StagingError};
pub use stager::{stage_application, StageOptions, StagingSummary};
