//! The iterative particle search.
//!
//! 1. Preprocess the RGB input into a full-resolution and a matching-resolution
//!    raster, and compute edge maps for both.
//! 2. Preliminary stage: correlate the downscaled edge map with a diffuse ring
//!    of the searched radius and take the local maxima as candidate centres.
//! 3. Refinement stages: cut the most circular particle found so far out of the
//!    image and use it as the template instead.
//! 4. For every candidate, trace a contour on a patch of the full-resolution
//!    edge map, offer the particle to the registry, then offer it again with
//!    its outlier points removed.
use super::backend::{DefaultBackend, SearchBackend};
use super::config::SearchConfig;
use super::preprocess::{preprocess, Prepared};
use super::stage::SearchStage;
use crate::contour::build_contour;
use crate::diagnostics::{InputDescriptor, SearchReport, StageReport, TimingBreakdown};
use crate::error::SearchError;
use crate::image::{resize_by, ImageF32, ImageRgbU8};
use crate::matching::diffuse_ellipse;
use crate::particle::{refine_particle, Particle, ParticleRegistry};
use crate::types::Point;
use log::{debug, info};
use std::time::Instant;

/// A validated search configuration bound to a backend.
#[derive(Clone, Debug)]
pub struct ParticleSearch<B = DefaultBackend> {
    config: SearchConfig,
    backend: B,
}

impl ParticleSearch<DefaultBackend> {
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        Self::with_backend(config, DefaultBackend)
    }
}

/// Edge maps shared by every stage of one run.
struct EdgeMaps {
    /// Full resolution, used for contour tracing.
    full: ImageF32,
    /// Matching resolution, used by the preliminary stage.
    scaled: ImageF32,
    /// Full-resolution edges of the plain grayscale image in colour-difference
    /// mode.
    gray: Option<ImageF32>,
}

impl<B: SearchBackend> ParticleSearch<B> {
    pub fn with_backend(config: SearchConfig, backend: B) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self { config, backend })
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Search one image.
    pub fn run(&self, rgb: &ImageRgbU8<'_>) -> Result<SearchReport, SearchError> {
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let start = Instant::now();
        let prepared = preprocess(rgb, &self.config)?;
        timings.push("preprocess", start.elapsed().as_secs_f64() * 1000.0);

        let start = Instant::now();
        let edges = self.edge_maps(&prepared);
        timings.push("edges", start.elapsed().as_secs_f64() * 1000.0);

        let mut registry = ParticleRegistry::new();
        let mut stages = Vec::new();
        let mut stage = SearchStage::Preliminary;
        while !stage.is_done() {
            let start = Instant::now();
            let candidates = match stage {
                SearchStage::Preliminary => self.ring_candidates(&prepared, &edges.scaled),
                _ => match registry.most_circular() {
                    Some(best) => self.particle_candidates(&prepared, best),
                    None => Vec::new(),
                },
            };
            debug!("{stage}: {} candidate centres", candidates.len());

            let mut report = StageReport::new(stage, candidates.len());
            for &candidate in &candidates {
                for edge_map in std::iter::once(&edges.full).chain(edges.gray.as_ref()) {
                    self.examine(edge_map, candidate, &mut registry, &mut report);
                }
            }
            report.registry_size = registry.len();
            report.elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
            timings.push(stage.to_string(), report.elapsed_ms);
            debug!("{}", report.summary());
            stages.push(report);

            stage = stage.next(self.config.iterations, registry.is_empty());
        }

        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        info!(
            "found {} particles with r={} in {:.1} ms",
            registry.len(),
            self.config.searched_radius,
            timings.total_ms
        );

        Ok(SearchReport {
            input: InputDescriptor {
                width: rgb.w,
                height: rgb.h,
                scale_factor: prepared.scale_factor,
                searched_radius: self.config.searched_radius,
            },
            particles: registry.into_particles(),
            stages,
            timings,
        })
    }

    fn edge_maps(&self, prepared: &Prepared) -> EdgeMaps {
        let full_opts = self.config.edges.full();
        EdgeMaps {
            full: self.backend.edge_map(&prepared.image, &full_opts),
            scaled: self
                .backend
                .edge_map(&prepared.scaled, &self.config.edges.scaled()),
            gray: prepared
                .gray
                .as_ref()
                .map(|g| self.backend.edge_map(g, &full_opts)),
        }
    }

    /// Candidate centres from a synthetic diffuse ring matched against the
    /// downscaled edge map.
    fn ring_candidates(&self, prepared: &Prepared, scaled_edges: &ImageF32) -> Vec<Point> {
        let m = &self.config.matching;
        let diameter = (2.0 * self.config.searched_radius * prepared.scale_factor).floor();
        let size = (m.factor * diameter).round() as usize;
        if size == 0 {
            debug!("searched radius vanishes at matching scale");
            return Vec::new();
        }
        let template = diffuse_ellipse((size, size), (diameter, diameter), m.sharpness);
        let crisp = diffuse_ellipse((size, size), (diameter, diameter), 1.0);
        let reference = self.backend.similarity(&crisp, &template) as f64;
        if reference <= 0.0 {
            debug!("ring template has no reference score, skipping stage");
            return Vec::new();
        }
        let scores = self.backend.similarity_map(scaled_edges, &template);
        let threshold = (m.tolerance * reference) as f32;
        self.maxima_at_full_resolution(&scores, threshold, prepared.scale_factor)
    }

    /// Candidate centres from `best`, cut out of the search image and matched
    /// against the downscaled image.
    fn particle_candidates(&self, prepared: &Prepared, best: &Particle) -> Vec<Point> {
        let m = &self.config.matching;
        let patch = self
            .backend
            .extract_patch(&prepared.image, best.center(), best.radius(), m.factor);
        let template = resize_by(&patch.image, prepared.scale_factor);
        let scores = self.backend.similarity_map(&prepared.scaled, &template);
        let threshold = (m.tolerance * m.refinement_threshold) as f32;
        self.maxima_at_full_resolution(&scores, threshold, prepared.scale_factor)
    }

    fn maxima_at_full_resolution(&self, scores: &ImageF32, threshold: f32, scale: f64) -> Vec<Point> {
        let inv = 1.0 / scale;
        self.backend
            .local_maxima(scores, self.config.matching.maxima_order, threshold)
            .into_iter()
            .map(|p| p.scale(inv, inv, true))
            .collect()
    }

    /// Trace a contour around `candidate` and offer it, raw and refined.
    fn examine(
        &self,
        edges: &ImageF32,
        candidate: Point,
        registry: &mut ParticleRegistry,
        report: &mut StageReport,
    ) {
        let radius = self.config.searched_radius;
        let contour_params = &self.config.contour;
        let rule = contour_params.admission_rule();

        let patch = self
            .backend
            .extract_patch(edges, candidate, radius, self.config.matching.factor);
        let contour = build_contour(&patch.image, patch.center, radius, &contour_params.sampling())
            .translated(patch.corner);
        let particle = Particle::new(contour);

        let raw = registry.try_admit(particle.clone(), &rule);
        if raw.is_admitted() {
            report.raw_admitted += 1;
        }
        let refined = refine_particle(&particle, contour_params.outlier_threshold);
        let adjusted = registry.try_admit(refined, &rule);
        if adjusted.is_admitted() {
            report.refined_admitted += 1;
        }
        debug!(
            "candidate ({:.0}, {:.0}): c={:.4} n={} raw {:?}, refined {:?}",
            candidate.x,
            candidate.y,
            particle.circularity(),
            particle.len(),
            raw,
            adjusted
        );
    }
}

/// Run one search with the default backend and return the particles found.
pub fn run_search(image: &ImageRgbU8<'_>, config: &SearchConfig) -> Result<Vec<Particle>, SearchError> {
    let search = ParticleSearch::new(config.clone())?;
    Ok(search.run(image)?.particles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edges::EdgeMapOptions;
    use crate::error::ConfigError;
    use crate::particle::Descriptors;

    #[test]
    fn invalid_config_fails_before_running() {
        let mut cfg = SearchConfig::new(20.0);
        cfg.contour.nb_points = 0;
        let err = ParticleSearch::new(cfg).unwrap_err();
        assert_eq!(err, SearchError::InvalidConfig(ConfigError::TooFewPoints(0)));
    }

    #[test]
    fn blank_image_finds_nothing() {
        let data = vec![128u8; 3 * 64 * 48];
        let image = ImageRgbU8::packed(64, 48, &data);
        let report = ParticleSearch::new(SearchConfig::new(10.0).with_iterations(3))
            .unwrap()
            .run(&image)
            .unwrap();
        assert!(report.particles.is_empty());
        assert_eq!(report.stages.len(), 1, "refinements skipped with empty registry");
        assert_eq!(report.stages[0].stage, SearchStage::Preliminary);
        assert_eq!(report.stages[0].candidates, 0);
    }

    #[test]
    fn empty_image_is_an_error() {
        let image = ImageRgbU8::packed(0, 0, &[]);
        assert!(matches!(
            run_search(&image, &SearchConfig::new(10.0)),
            Err(SearchError::EmptyImage { .. })
        ));
    }

    /// Grayscale image as the edge map, plus a bright segment six pixels
    /// outside the ring on the ray at angle zero.
    struct SpikedEdges;

    impl SearchBackend for SpikedEdges {
        fn edge_map(&self, image: &ImageF32, _opts: &EdgeMapOptions) -> ImageF32 {
            let mut edges = image.clone();
            for y in 71..=77 {
                edges.set(118, y, 2.0);
            }
            edges
        }
    }

    fn ring_image(w: usize, h: usize, c: Point, r: f64) -> Vec<u8> {
        let mut data = Vec::with_capacity(3 * w * h);
        for y in 0..h {
            for x in 0..w {
                let d = Point::new(x as f64, y as f64).distance(&c);
                let v = if (d - r).abs() <= 0.5 { 255 } else { 0 };
                data.extend_from_slice(&[v, v, v]);
            }
        }
        data
    }

    #[test]
    fn refined_particle_replaces_its_raw_version() {
        let (w, h) = (160, 150);
        let data = ring_image(w, h, Point::new(82.0, 74.0), 30.0);
        let image = ImageRgbU8::packed(w, h, &data);
        let search = ParticleSearch::with_backend(SearchConfig::new(30.0), SpikedEdges).unwrap();
        let report = search.run(&image).unwrap();

        let first = &report.stages[0];
        assert!(first.raw_admitted >= 1, "{}", first.summary());
        assert!(first.refined_admitted >= 1, "{}", first.summary());

        assert_eq!(report.particles.len(), 1, "{}", report.summary());
        let p = &report.particles[0];
        assert_eq!(p.len(), 34, "the spiked point is stripped");
        assert!(p.contour().points().iter().all(|q| q.x < 117.0));
        assert_eq!(*p.descriptors(), Descriptors::of(p.contour()));
    }
}
