#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod batch;
pub mod calibration;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod particle;
pub mod search;
pub mod types;

// Building blocks of the search; public so they can be used and tested
// on their own.
pub mod config;
pub mod contour;
pub mod edges;
pub mod export;
pub mod matching;

// --- High-level re-exports -------------------------------------------------

pub use crate::batch::BatchSearch;
pub use crate::calibration::PixelScale;
pub use crate::diagnostics::{SearchReport, StageReport};
pub use crate::error::{ConfigError, SearchError};
pub use crate::particle::{Particle, ParticleRegistry};
pub use crate::search::{run_search, ParticleSearch, SearchConfig};
pub use crate::types::{Contour, Point};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use particle_finder::prelude::*;
///
/// # fn main() -> Result<(), SearchError> {
/// let (w, h) = (640usize, 480usize);
/// let rgb = vec![0u8; 3 * w * h];
/// let image = ImageRgbU8::packed(w, h, &rgb);
///
/// let report = ParticleSearch::new(SearchConfig::new(40.0))?.run(&image)?;
/// for p in &report.particles {
///     println!("r={:.2} c={:.3} at ({:.1}, {:.1})", p.radius(), p.circularity(), p.center().x, p.center().y);
/// }
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageRgbU8;
    pub use crate::{
        Contour, Particle, ParticleRegistry, ParticleSearch, Point, SearchConfig, SearchError,
    };
}
