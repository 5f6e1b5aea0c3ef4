// Scoring: accumulation, war-signal boosting, normalization, theme and
// genre scorers, structural refinement.
//
// Every empirically tuned constant lives in one of the weights structs below,
// each with a Default matching the shipped behaviour. A JSON file can
// override any subset of them through Tuning::load.

pub mod accumulator;
pub mod booster;
pub mod genres;
pub mod model;
pub mod normalize;
pub mod refine;
pub mod themes;

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub use accumulator::{PercentageDistribution, ScoreAccumulator};
pub use booster::BoostWeights;
pub use genres::{GenreWeights, Sharpening};
pub use normalize::NormalizerLimits;
pub use refine::RefinerWeights;
pub use themes::HeuristicWeights;

/// All tuning constants used by the analyzers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub boost: BoostWeights,
    pub normalizer: NormalizerLimits,
    pub heuristic: HeuristicWeights,
    pub genre: GenreWeights,
    pub sharpening: Sharpening,
    pub refiner: RefinerWeights,
}

impl Tuning {
    /// Read a (possibly partial) JSON override file. Missing fields keep
    /// their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read tuning file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid tuning file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw).context("Failed to parse tuning JSON")
    }
}
