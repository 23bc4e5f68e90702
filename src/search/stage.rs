//! Stages of the iterative search.
use serde::Serialize;
use std::fmt;

/// Where a search run stands.
///
/// `Preliminary` matches a synthetic ring; each `Refinement(i)` (1-based)
/// matches the most circular particle found so far. The run ends after the
/// configured number of refinements, or as soon as a refinement would start
/// with nothing found.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchStage {
    Preliminary,
    Refinement(usize),
    Done,
}

impl SearchStage {
    /// Stage following `self` given the refinement budget and whether the
    /// registry is currently empty.
    pub fn next(self, iterations: usize, registry_empty: bool) -> SearchStage {
        let round = match self {
            SearchStage::Preliminary => 1,
            SearchStage::Refinement(i) => i + 1,
            SearchStage::Done => return SearchStage::Done,
        };
        if round > iterations || registry_empty {
            SearchStage::Done
        } else {
            SearchStage::Refinement(round)
        }
    }

    pub fn is_done(self) -> bool {
        self == SearchStage::Done
    }
}

impl fmt::Display for SearchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStage::Preliminary => write!(f, "preliminary"),
            SearchStage::Refinement(i) => write!(f, "refinement {i}"),
            SearchStage::Done => write!(f, "done"),
        }
    }
}
