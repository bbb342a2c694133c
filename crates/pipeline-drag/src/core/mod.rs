//! Core building blocks shared by every component
//!
//! Geometry primitives, configuration, the crate error type and logging setup.

mod config;
mod error;
mod geometry;
pub mod logging;

pub use config::*;
pub use error::*;
pub use geometry::*;
pub use logging::*;
