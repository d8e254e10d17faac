//! CLI module for Nuxstage
//!
//! `stage` runs a full staging attempt; `resolve` and `render` are
//! standalone utilities for inspecting what staging would produce without
//! touching disk.

pub mod error;
pub mod render;
pub mod resolve;
pub mod stage;

use anyhow::Context;
use nuxstage_protocol::ServiceBinding;
use self::error::HelpfulError;
use std::path::Path;

/// Environment variable the host framework uses to hand over the bound
/// services document.
const SERVICES_ENV_VAR: &str = "VCAP_SERVICES";

/// Load the bound services: from an explicit file, else from the
/// environment, else none.
pub fn load_bindings(services: Option<&Path>) -> anyhow::Result<Vec<ServiceBinding>> {
    let document = match services {
        Some(path) => {
            if !path.is_file() {
                return Err(HelpfulError::path_not_found(path)
                    .with_context("Expected a JSON array of service bindings")
                    .into());
            }
            Some(std::fs::read_to_string(path).with_context(|| {
                format!("Failed to read services file: {}", path.display())
            })?)
        }
        None => std::env::var(SERVICES_ENV_VAR).ok(),
    };

    match document {
        Some(json) => ServiceBinding::parse_list(&json)
            .context("Failed to parse bound services document"),
        None => Ok(Vec::new()),
    }
}
