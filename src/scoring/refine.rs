// Structural refinement of genre percentages.
//
// Runs after either genre path has produced a distribution. Layout features
// add bounded points to the matching genres; the result is normalized again.

use serde::Deserialize;
use tracing::debug;

use crate::categories::genres::{ACADEMIC, LETTER, POETRY, STORY, TECHNICAL};
use crate::text::structure::StructuralFeatures;

use super::accumulator::PercentageDistribution;
use super::normalize::{normalize, NormalizerLimits};

/// Thresholds and boost sizes for the refiner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefinerWeights {
    pub poetry_max_line: f64,
    pub poetry_boost: u32,
    pub story_dialogue_ratio: f64,
    pub story_boost: u32,
    pub technical_ratio: f64,
    pub technical_boost: u32,
    pub academic_boost: u32,
    pub letter_boost: u32,
}

impl Default for RefinerWeights {
    fn default() -> Self {
        Self {
            poetry_max_line: 40.0,
            poetry_boost: 15,
            story_dialogue_ratio: 0.2,
            story_boost: 10,
            technical_ratio: 0.15,
            technical_boost: 10,
            academic_boost: 8,
            letter_boost: 15,
        }
    }
}

/// Apply layout boosts and re-normalize. An empty distribution stays empty.
pub fn refine(
    dist: &PercentageDistribution,
    features: &StructuralFeatures,
    weights: &RefinerWeights,
    limits: &NormalizerLimits,
) -> PercentageDistribution {
    if dist.is_empty() {
        return dist.clone();
    }
    let mut boosted = dist.clone();

    if features.avg_line_length < weights.poetry_max_line {
        boost(&mut boosted, POETRY, weights.poetry_boost);
    }
    if features.dialogue_ratio > weights.story_dialogue_ratio {
        boost(&mut boosted, STORY, weights.story_boost);
    }
    if features.technical_ratio > weights.technical_ratio {
        boost(&mut boosted, TECHNICAL, weights.technical_boost);
        boost(&mut boosted, ACADEMIC, weights.academic_boost);
    }
    if features.has_letter_frame() {
        boost(&mut boosted, LETTER, weights.letter_boost);
    }

    debug!(?features, "Applied structural genre refinement");
    normalize(&boosted.to_accumulator(), limits)
}

/// Add up to `points`, never past 100.
fn boost(dist: &mut PercentageDistribution, label: &str, points: u32) {
    if let Some(current) = dist.get(label) {
        dist.set(label, current + points.min(100u32.saturating_sub(current)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::genres::ESSAY;

    fn dist(pairs: &[(&str, u32)]) -> PercentageDistribution {
        PercentageDistribution::from_pairs(pairs.iter().map(|(l, v)| (*l, *v)))
    }

    #[test]
    fn test_short_lines_boost_poetry() {
        let d = dist(&[(POETRY, 40), (STORY, 30), (ESSAY, 30)]);
        let f = StructuralFeatures::from_text("short line\nanother one\nand more");
        let out = refine(&d, &f, &RefinerWeights::default(), &NormalizerLimits::default());
        // 55 / 30 / 30 → 47.8 / 26.1 / 26.1
        assert_eq!(out.get(POETRY), Some(48));
        assert!(out.get(POETRY).unwrap() <= 40 + 15);
    }

    #[test]
    fn test_boost_capped_at_100() {
        let mut d = dist(&[(POETRY, 95), (STORY, 5)]);
        boost(&mut d, POETRY, 15);
        assert_eq!(d.get(POETRY), Some(100));
    }

    #[test]
    fn test_letter_frame_boost() {
        let d = dist(&[(LETTER, 40), (ESSAY, 45), (STORY, 15)]);
        let text = "Dear Alice, it has been far too long since we last spoke at length.\n\n\
                    We think of you often and hope the new house is everything you wanted.\n\n\
                    Sincerely, with all the warmth that a short note can possibly carry";
        let f = StructuralFeatures::from_text(text);
        assert!(f.avg_line_length >= 40.0);
        let out = refine(&d, &f, &RefinerWeights::default(), &NormalizerLimits::default());
        // 55 / 45 / 15 → 48 / 39 / 13
        assert_eq!(out.ranked()[0].0, LETTER);
    }

    #[test]
    fn test_empty_stays_empty() {
        let f = StructuralFeatures::from_text("x");
        let out = refine(
            &PercentageDistribution::empty(),
            &f,
            &RefinerWeights::default(),
            &NormalizerLimits::default(),
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_result_respects_cap() {
        let d = dist(&[(POETRY, 90), (STORY, 10)]);
        let f = StructuralFeatures::from_text("tiny\nlines");
        let out = refine(&d, &f, &RefinerWeights::default(), &NormalizerLimits::default());
        assert!(out.get(POETRY).unwrap() <= 80);
    }
}
