//! Pressure map service library.
//!
//! Wires the binning and rendering crates to a readings source and keeps the
//! per-map state in an explicit [`session::MapSession`].

pub mod config;
pub mod metrics;
pub mod pipeline;
pub mod session;
pub mod source;

pub use config::ServiceConfig;
pub use session::{LoadOutcome, LoadState, MapSession, RequestId, SessionSnapshot};
pub use source::{FileReadingsSource, HttpReadingsSource, ReadingsQuery, ReadingsSource};
