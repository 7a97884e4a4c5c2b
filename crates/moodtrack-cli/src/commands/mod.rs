pub mod analyze;
pub mod catalog;
pub mod config;
pub mod logging;
pub mod matching;
pub mod render;

pub use analyze::run_analyze;
pub use catalog::show_catalog;
pub use matching::run_match;
