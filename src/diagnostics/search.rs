use crate::diagnostics::TimingBreakdown;
use crate::particle::Particle;
use crate::search::SearchStage;
use serde::Serialize;

/// Result of [`ParticleSearch::run`](crate::search::ParticleSearch::run).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchReport {
    pub input: InputDescriptor,
    pub particles: Vec<Particle>,
    pub stages: Vec<StageReport>,
    pub timings: TimingBreakdown,
}

impl SearchReport {
    /// One line per stage, for logs and demo output.
    pub fn summary(&self) -> String {
        self.stages
            .iter()
            .map(StageReport::summary)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    /// Matching resolution over input resolution.
    pub scale_factor: f64,
    pub searched_radius: f64,
}

/// What one stage of the search did.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageReport {
    pub stage: SearchStage,
    pub candidates: usize,
    /// Contours admitted as built.
    pub raw_admitted: usize,
    /// Contours admitted after outlier removal.
    pub refined_admitted: usize,
    /// Registry size when the stage ended.
    pub registry_size: usize,
    pub elapsed_ms: f64,
}

impl StageReport {
    pub fn new(stage: SearchStage, candidates: usize) -> Self {
        Self {
            stage,
            candidates,
            raw_admitted: 0,
            refined_admitted: 0,
            registry_size: 0,
            elapsed_ms: 0.0,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} candidates, {} raw + {} refined admissions, {} particles ({:.1} ms)",
            self.stage,
            self.candidates,
            self.raw_admitted,
            self.refined_admitted,
            self.registry_size,
            self.elapsed_ms
        )
    }
}
