//! Diagnostics returned alongside search results.
//!
//! `SearchReport` is the main entry point: the particles found plus a
//! per-stage account of candidates and admissions, and a timing breakdown.

pub mod search;
pub mod timing;

pub use search::{InputDescriptor, SearchReport, StageReport};
pub use timing::{StageTiming, TimingBreakdown};
