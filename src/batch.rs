//! Several searches over several images.
//!
//! Each image gets its own [`ParticleRegistry`]. Every configured search runs
//! on the image independently and its particles are then merged into that
//! registry under the search's own admission rule, so particles of different
//! sizes found by different searches compete for the same slots.
//!
//! With the `parallel` feature images are processed concurrently; a single
//! image is always searched sequentially.
use crate::error::SearchError;
use crate::image::ImageRgbU8;
use crate::particle::ParticleRegistry;
use crate::search::{DefaultBackend, ParticleSearch, SearchBackend, SearchConfig};
use log::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub struct BatchSearch<B = DefaultBackend> {
    searches: Vec<ParticleSearch<B>>,
}

impl BatchSearch<DefaultBackend> {
    pub fn new(configs: Vec<SearchConfig>) -> Result<Self, SearchError> {
        Self::with_backend(configs, DefaultBackend)
    }
}

impl<B: SearchBackend + Clone + Sync> BatchSearch<B> {
    /// Validate every configuration; the first invalid one is reported.
    pub fn with_backend(configs: Vec<SearchConfig>, backend: B) -> Result<Self, SearchError> {
        let searches = configs
            .into_iter()
            .map(|cfg| ParticleSearch::with_backend(cfg, backend.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { searches })
    }

    pub fn searches(&self) -> &[ParticleSearch<B>] {
        &self.searches
    }

    /// Run every search on `image` and merge the results.
    pub fn run_image(&self, image: &ImageRgbU8<'_>) -> Result<ParticleRegistry, SearchError> {
        let mut registry = ParticleRegistry::new();
        for search in &self.searches {
            let report = search.run(image)?;
            let rule = search.config().contour.admission_rule();
            for particle in report.particles {
                registry.try_admit(particle, &rule);
            }
        }
        Ok(registry)
    }

    /// One registry per image, in input order.
    pub fn run(&self, images: &[ImageRgbU8<'_>]) -> Result<Vec<ParticleRegistry>, SearchError> {
        let registries = self.run_all(images)?;
        for (i, registry) in registries.iter().enumerate() {
            info!("image {} / {}: {} particles", i + 1, images.len(), registry.len());
        }
        Ok(registries)
    }

    #[cfg(not(feature = "parallel"))]
    fn run_all(&self, images: &[ImageRgbU8<'_>]) -> Result<Vec<ParticleRegistry>, SearchError> {
        images.iter().map(|img| self.run_image(img)).collect()
    }

    #[cfg(feature = "parallel")]
    fn run_all(&self, images: &[ImageRgbU8<'_>]) -> Result<Vec<ParticleRegistry>, SearchError> {
        images.par_iter().map(|img| self.run_image(img)).collect()
    }
}
