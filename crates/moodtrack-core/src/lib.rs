//! Core catalog model for moodtrack.
//!
//! This crate defines the track model, the shared read-only catalog the
//! ranking engine reads from, and catalog loading.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod catalog;
pub mod error;
pub mod model;

pub use catalog::Catalog;
pub use error::{Error, Result};
pub use model::{Track, TrackId};
