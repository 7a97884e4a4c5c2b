//! Image vibe analysis for moodtrack.
//!
//! Turns an image reference into descriptive prose through an
//! OpenAI-compatible vision model, then hands the prose to the ranking
//! engine. Also owns the layered configuration shared by the CLI.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod image;
pub mod pipeline;

pub use client::{VibeAnalyzer, VisionClient};
pub use config::Config;
pub use error::{VisionError, VisionResult};
pub use image::ImageSource;
pub use pipeline::VibePipeline;
