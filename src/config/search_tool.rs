//! JSON configuration of the `particle_search` tool.
//!
//! The file names the input images, the searches to run on each of them, an
//! optional calibration and the output locations. [`SearchToolConfig::into_command`]
//! turns it into the single decision the tool acts on.
use crate::search::SearchConfig;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct SearchToolConfig {
    pub images: Vec<PathBuf>,
    pub searches: Vec<SearchConfig>,
    #[serde(default)]
    pub calibration: Option<CalibrationConfig>,
    pub output: SearchOutputConfig,
    /// Set to `false` to validate a configuration without searching.
    #[serde(default = "default_run")]
    pub run: bool,
}

fn default_run() -> bool {
    true
}

/// Images whose particles all have a known physical radius.
#[derive(Clone, Debug, Deserialize)]
pub struct CalibrationConfig {
    /// Indices into `images`; out-of-range indices are ignored.
    pub images: Vec<usize>,
    pub particle_radius: f64,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchOutputConfig {
    pub records_json: PathBuf,
    /// One overlay PNG per image, `image_<index>.png`.
    #[serde(default)]
    pub overlay_dir: Option<PathBuf>,
}

/// Everything needed to run a batch.
#[derive(Debug)]
pub struct SearchPlan {
    pub images: Vec<PathBuf>,
    pub searches: Vec<SearchConfig>,
    pub calibration: Option<CalibrationConfig>,
    pub output: SearchOutputConfig,
}

/// What the tool should do with a loaded configuration.
#[derive(Debug)]
pub enum SearchCommand {
    Run(SearchPlan),
    Skip { reason: String },
}

impl SearchToolConfig {
    pub fn into_command(self) -> SearchCommand {
        if !self.run {
            return SearchCommand::Skip {
                reason: "run is disabled in the configuration".to_string(),
            };
        }
        if self.images.is_empty() {
            return SearchCommand::Skip {
                reason: "no input images".to_string(),
            };
        }
        if self.searches.is_empty() {
            return SearchCommand::Skip {
                reason: "no searches configured".to_string(),
            };
        }
        SearchCommand::Run(SearchPlan {
            images: self.images,
            searches: self.searches,
            calibration: self.calibration,
            output: self.output,
        })
    }
}

pub fn load_config(path: &Path) -> Result<SearchToolConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}
