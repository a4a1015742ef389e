//! Common types and utilities shared across the pressure-map workspace.

pub mod bbox;
pub mod color;
pub mod config;
pub mod error;
pub mod reading;

pub use bbox::{BoundingBox, Viewport};
pub use color::Color;
pub use config::MapConfig;
pub use error::{MapError, MapResult};
pub use reading::Reading;
