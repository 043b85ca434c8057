#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

// Organized modules
pub mod conic;
pub mod geometry;
pub mod math;

pub use geometry::line;
pub use geometry::r2;

// Utility modules
pub mod error;
pub mod live;
pub mod spec;

// Re-export key types for external use
pub use conic::{Conic, Range};
pub use conic::definition::{Definition, Family, Kind, Parent, ParentType};
pub use conic::frame::{Canonical, CanonicalFrame};
pub use conic::quadratic_form::QuadraticForm;
pub use error::ConicError;
pub use line::Line;
pub use live::Live;
pub use r2::R2;
pub use spec::{ConicSpec, ParentSpec};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, ConicError> {
    match level {
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") | Some("") | None => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(ConicError::InvalidLogLevel(level.to_string())),
    }
}
