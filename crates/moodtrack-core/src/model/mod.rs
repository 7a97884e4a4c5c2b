pub mod ids;
pub mod track;

pub use ids::TrackId;
pub use track::Track;
