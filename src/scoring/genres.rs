// Genre scoring: positional keyword counts, tiered structural patterns and
// layout bonuses for the legacy path, plus the confidence sharpening shared
// by both paths.

use serde::Deserialize;

use crate::categories::genres::{PatternTier, ACADEMIC, ESSAY, LETTER, POETRY, STORY, TECHNICAL};
use crate::categories::{CategoryTables, GenreCategory};
use crate::text::structure::StructuralFeatures;

use super::accumulator::{PercentageDistribution, ScoreAccumulator};

/// Genres are classified with the classifier's default template only.
pub const GENRE_TEMPLATE: &str = crate::classifier::traits::DEFAULT_HYPOTHESIS_TEMPLATE;

/// Constants for the legacy genre scorer.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenreWeights {
    /// Lines at index below this count as title lines (default 3)
    pub title_lines: usize,
    pub title_bonus: f64,
    pub paragraph_start_bonus: f64,
    /// Heading lines are shorter than this and end with ':' (default 50)
    pub heading_max_chars: usize,
    pub heading_bonus: f64,
    pub keyword_factor: f64,
    pub pattern_factor: f64,
    pub strong_pattern: f64,
    pub normal_pattern: f64,
    pub weak_pattern: f64,

    pub poetry_short_line: f64,
    pub poetry_short_line_bonus: f64,
    pub poetry_stanza_paragraphs: usize,
    pub poetry_stanza_line: f64,
    pub poetry_stanza_bonus: f64,
    pub story_dialogue_ratio: f64,
    pub story_dialogue_bonus: f64,
    pub story_line_min: f64,
    pub story_line_max: f64,
    pub story_line_bonus: f64,
    pub prose_long_line: f64,
    pub prose_long_line_bonus: f64,
    pub prose_technical_ratio: f64,
    pub prose_technical_bonus: f64,
    pub technical_marker_ratio: f64,
    pub technical_formatting_density: f64,
    pub technical_bonus: f64,
    pub letter_greeting_bonus: f64,
    pub letter_closing_bonus: f64,
}

impl Default for GenreWeights {
    fn default() -> Self {
        Self {
            title_lines: 3,
            title_bonus: 2.0,
            paragraph_start_bonus: 1.5,
            heading_max_chars: 50,
            heading_bonus: 2.0,
            keyword_factor: 2.0,
            pattern_factor: 3.0,
            strong_pattern: 3.0,
            normal_pattern: 1.0,
            weak_pattern: 0.5,

            poetry_short_line: 40.0,
            poetry_short_line_bonus: 15.0,
            poetry_stanza_paragraphs: 5,
            poetry_stanza_line: 50.0,
            poetry_stanza_bonus: 10.0,
            story_dialogue_ratio: 0.2,
            story_dialogue_bonus: 20.0,
            story_line_min: 40.0,
            story_line_max: 100.0,
            story_line_bonus: 10.0,
            prose_long_line: 80.0,
            prose_long_line_bonus: 15.0,
            prose_technical_ratio: 0.1,
            prose_technical_bonus: 15.0,
            technical_marker_ratio: 0.2,
            technical_formatting_density: 0.1,
            technical_bonus: 20.0,
            letter_greeting_bonus: 10.0,
            letter_closing_bonus: 10.0,
        }
    }
}

impl GenreWeights {
    fn tier_weight(&self, tier: PatternTier) -> f64 {
        match tier {
            PatternTier::Strong => self.strong_pattern,
            PatternTier::Normal => self.normal_pattern,
            PatternTier::Weak => self.weak_pattern,
        }
    }
}

/// Confidence sharpening for a clear winner.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Sharpening {
    /// Lead (in points) the top genre needs over the runner-up (default 20)
    pub min_lead: u32,
    /// Points added to the top genre, capped at 100 (default 10)
    pub top_bonus: u32,
    /// Points taken from the runner-up (default 5)
    pub runner_up_penalty: u32,
    /// The runner-up is never reduced below this (default 5)
    pub runner_up_floor: u32,
}

impl Default for Sharpening {
    fn default() -> Self {
        Self {
            min_lead: 20,
            top_bonus: 10,
            runner_up_penalty: 5,
            runner_up_floor: 5,
        }
    }
}

/// Legacy raw genre scores: `2 × keywords + 3 × patterns + layout bonuses`.
pub fn legacy_genre_scores(
    text: &str,
    features: &StructuralFeatures,
    tables: &CategoryTables,
    weights: &GenreWeights,
) -> ScoreAccumulator {
    let mut acc = ScoreAccumulator::new(&tables.genre_labels());
    let lower_text = text.to_lowercase();
    let lines: Vec<&str> = text.split('\n').collect();
    let lower_lines: Vec<String> = lines.iter().map(|l| l.to_lowercase()).collect();

    for genre in &tables.genres {
        let keywords = keyword_count(genre, &lower_text, &lines, &lower_lines, weights);
        let patterns = pattern_count(genre, text, weights);
        let base = keywords * weights.keyword_factor
            + patterns * weights.pattern_factor
            + structural_bonus(&genre.label, features, weights);
        acc.add(&genre.label, base);
    }

    acc
}

/// Positional keyword weighting plus raw occurrence counts.
fn keyword_count(
    genre: &GenreCategory,
    lower_text: &str,
    lines: &[&str],
    lower_lines: &[String],
    weights: &GenreWeights,
) -> f64 {
    let mut count = 0.0;
    for keyword in &genre.keywords {
        let keyword = keyword.as_str();
        for (i, line) in lower_lines.iter().enumerate() {
            if !line.contains(keyword) {
                continue;
            }
            if i < weights.title_lines {
                count += weights.title_bonus;
            }
            if i == 0 || lines[i - 1].trim().is_empty() {
                count += weights.paragraph_start_bonus;
            }
            if lines[i].chars().count() < weights.heading_max_chars
                && lines[i].trim().ends_with(':')
            {
                count += weights.heading_bonus;
            }
        }
        count += lower_text.matches(keyword).count() as f64;
    }
    count
}

fn pattern_count(genre: &GenreCategory, text: &str, weights: &GenreWeights) -> f64 {
    genre
        .patterns
        .iter()
        .map(|p| p.count(text) as f64 * weights.tier_weight(p.tier))
        .sum()
}

/// Genre-specific layout bonuses.
fn structural_bonus(label: &str, f: &StructuralFeatures, w: &GenreWeights) -> f64 {
    let mut bonus = 0.0;
    match label {
        POETRY => {
            if f.avg_line_length < w.poetry_short_line {
                bonus += w.poetry_short_line_bonus;
            }
            if f.paragraph_count > w.poetry_stanza_paragraphs
                && f.avg_line_length < w.poetry_stanza_line
            {
                bonus += w.poetry_stanza_bonus;
            }
        }
        STORY => {
            if f.dialogue_ratio > w.story_dialogue_ratio {
                bonus += w.story_dialogue_bonus;
            }
            if f.avg_line_length > w.story_line_min && f.avg_line_length < w.story_line_max {
                bonus += w.story_line_bonus;
            }
        }
        ESSAY | ACADEMIC => {
            if f.avg_line_length > w.prose_long_line {
                bonus += w.prose_long_line_bonus;
            }
            if f.technical_ratio > w.prose_technical_ratio {
                bonus += w.prose_technical_bonus;
            }
        }
        TECHNICAL => {
            if f.technical_ratio > w.technical_marker_ratio
                || f.formatting_density > w.technical_formatting_density
            {
                bonus += w.technical_bonus;
            }
        }
        LETTER => {
            if f.has_greeting {
                bonus += w.letter_greeting_bonus;
            }
            if f.has_closing {
                bonus += w.letter_closing_bonus;
            }
        }
        _ => {}
    }
    bonus
}

/// Widen a clear lead: when the top genre beats the runner-up by more than
/// `min_lead` points, the top gains up to `top_bonus` and the runner-up loses
/// up to `runner_up_penalty` (never below `runner_up_floor`).
pub fn sharpen(dist: &mut PercentageDistribution, s: &Sharpening) {
    let ranked: Vec<(String, u32)> = dist
        .ranked()
        .into_iter()
        .take(2)
        .map(|(l, v)| (l.to_string(), v))
        .collect();
    let [(top_label, top), (second_label, second)] = ranked.as_slice() else {
        return;
    };

    if top - second <= s.min_lead {
        return;
    }

    dist.set(top_label, top + s.top_bonus.min(100u32.saturating_sub(*top)));
    if *second > s.runner_up_floor {
        dist.set(
            second_label,
            second - s.runner_up_penalty.min(second - s.runner_up_floor),
        );
    }
}
