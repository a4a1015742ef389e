//! Shared test utilities for the pressure-map workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Deterministic synthetic reading generators
//! - Common viewports and reading fixtures
//! - Helpers for writing readings payloads to temporary files
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{fixtures, scattered_readings};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

use std::io::Write;

use pressure_common::Reading;
use tempfile::NamedTempFile;

/// Write readings as the JSON array the readings service returns.
///
/// The file is deleted when the returned handle is dropped.
pub fn write_readings_file(readings: &[Reading]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    let json = serde_json::to_string(readings).expect("Failed to serialize readings");
    file.write_all(json.as_bytes())
        .expect("Failed to write readings");
    file
}
