//! Particle search: configuration, raster collaborators, stages and the
//! search loop itself.

pub mod backend;
pub mod config;
pub mod pipeline;
pub mod preprocess;
pub mod stage;

pub use backend::{DefaultBackend, SearchBackend};
pub use config::{ContourParams, EdgeParams, MatchParams, SearchConfig};
pub use pipeline::{run_search, ParticleSearch};
pub use preprocess::{color_differences, normalize, preprocess, to_grayscale, Prepared};
pub use stage::SearchStage;
