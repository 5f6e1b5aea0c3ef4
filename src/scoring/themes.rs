// Theme scoring: hypothesis templates for the model path, and the lexical
// heuristic used when the model is unavailable or fails.
//
// The heuristic combines four signals per theme:
// 1. Keyword hits: exact token matches and shared prefixes of long words
// 2. Lexical similarity: token/keyword pairs the lexicon rates as near-synonyms
// 3. Proximity: several theme words inside one sliding character window
// 4. TF-IDF similarity between the text and a per-theme keyword document,
//    blended in for longer texts

use std::collections::HashMap;

use serde::Deserialize;
use tracing::debug;

use crate::categories::themes::{war, WAR_CONFLICT};
use crate::categories::CategoryTables;
use crate::error::AnalysisError;
use crate::lexicon::LexicalDatabase;
use crate::topics::vectorizer::{DocFrequency, TfidfVectorizer, VectorizerConfig};

use super::accumulator::ScoreAccumulator;

/// Hypothesis phrasings averaged for every chunk on the model path.
pub const THEME_TEMPLATES: [&str; 3] = [
    "This text is about {}.",
    "The theme of this text is {}.",
    "This passage discusses {}.",
];

/// Constants for the lexical heuristic.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Exact keyword hit (default 1.0)
    pub exact_match: f64,
    /// Exact hit on a war indicator under War/Conflict (default 1.5)
    pub war_indicator_match: f64,
    /// Token and keyword share a prefix (default 0.5)
    pub prefix_match: f64,
    /// Both words must be longer than this for a prefix match (default 4)
    pub prefix_min_chars: usize,
    /// Lexicon rates the pair as near-synonyms (default 0.7)
    pub synonym_match: f64,
    /// Similarity must exceed this (default 0.7)
    pub synonym_threshold: f64,
    /// Proximity window width in characters (default 200)
    pub window_chars: usize,
    /// Proximity window stride in characters (default 100)
    pub window_stride: usize,
    /// Per theme word in a window with several theme words (default 0.5)
    pub window_weight: f64,
    /// War window signals needed for the strong war weight (default 2)
    pub war_window_signals: usize,
    /// Per War/Conflict word in a window with war signals (default 1.0)
    pub war_window_strong: f64,
    /// Per War/Conflict word otherwise (default 0.6)
    pub war_window_weak: f64,
    /// Similarity blending needs more filtered tokens than this (default 20)
    pub similarity_min_tokens: usize,
    /// Similarity weight floor (default 30)
    pub similarity_base_weight: usize,
    /// Similarity weight ceiling (default 70)
    pub similarity_max_weight: usize,
    /// Tokens per extra similarity weight point (default 100)
    pub similarity_tokens_per_point: usize,
    /// War similarity terms needed for the war boost (default 2)
    pub war_similarity_min_terms: usize,
    /// War similarity boost per term (default 10)
    pub war_similarity_per_term: i64,
    /// War similarity boost ceiling (default 30)
    pub war_similarity_max: i64,
    /// Share of the heuristic percentage in the blend (default 0.7)
    pub heuristic_share: f64,
    /// Share of the similarity score in the blend (default 0.3)
    pub similarity_share: f64,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self {
            exact_match: 1.0,
            war_indicator_match: 1.5,
            prefix_match: 0.5,
            prefix_min_chars: 4,
            synonym_match: 0.7,
            synonym_threshold: 0.7,
            window_chars: 200,
            window_stride: 100,
            window_weight: 0.5,
            war_window_signals: 2,
            war_window_strong: 1.0,
            war_window_weak: 0.6,
            similarity_min_tokens: 20,
            similarity_base_weight: 30,
            similarity_max_weight: 70,
            similarity_tokens_per_point: 100,
            war_similarity_min_terms: 2,
            war_similarity_per_term: 10,
            war_similarity_max: 30,
            heuristic_share: 0.7,
            similarity_share: 0.3,
        }
    }
}

/// Raw heuristic scores from keyword, lexical and proximity signals.
///
/// `lower_text` is the whole input lower-cased; `tokens` its filtered content
/// words (stop words and non-alphanumerics removed).
pub fn heuristic_theme_scores(
    lower_text: &str,
    tokens: &[String],
    tables: &CategoryTables,
    lexicon: &dyn LexicalDatabase,
    weights: &HeuristicWeights,
) -> ScoreAccumulator {
    let mut acc = ScoreAccumulator::new(&tables.theme_labels());

    // Every signal is per occurrence, so score each distinct token once.
    let token_counts = distinct_counts(tokens);
    let windows = proximity_windows(lower_text, weights.window_chars, weights.window_stride);

    for theme in &tables.themes {
        let is_war = theme.label == WAR_CONFLICT;
        let mut score = 0.0;

        for (token, count) in &token_counts {
            let n = *count as f64;

            if theme.keywords.iter().any(|k| k == token) {
                let hit = if is_war && war::INDICATORS.contains(&token.as_str()) {
                    weights.war_indicator_match
                } else {
                    weights.exact_match
                };
                score += hit * n;
            }

            let token_chars = token.chars().count();
            for keyword in &theme.keywords {
                if token_chars > weights.prefix_min_chars
                    && keyword.chars().count() > weights.prefix_min_chars
                    && (keyword.starts_with(token.as_str()) || token.starts_with(keyword.as_str()))
                {
                    score += weights.prefix_match * n;
                }

                match lexicon.similarity(token, keyword) {
                    Ok(Some(sim)) if sim > weights.synonym_threshold => {
                        score += weights.synonym_match * n;
                    }
                    Ok(_) => {}
                    Err(e) => {
                        let err = AnalysisError::LexicalLookup {
                            word: token.clone(),
                            reason: format!("{e:#}"),
                        };
                        debug!(keyword = keyword.as_str(), "Skipping pair: {}", err);
                    }
                }
            }
        }

        for window in &windows {
            let theme_words = theme
                .keywords
                .iter()
                .filter(|k| window.contains(k.as_str()))
                .count();
            if theme_words == 0 {
                continue;
            }
            let theme_words_f = theme_words as f64;

            if is_war {
                let signals = war::WINDOW_SIGNALS
                    .iter()
                    .filter(|s| window.contains(*s))
                    .count();
                if signals >= weights.war_window_signals {
                    score += theme_words_f * weights.war_window_strong;
                } else if theme_words > 1 {
                    score += theme_words_f * weights.war_window_weak;
                }
            } else if theme_words > 1 {
                score += theme_words_f * weights.window_weight;
            }
        }

        acc.add(&theme.label, score);
    }

    acc
}

/// Blend TF-IDF similarity between the text and each theme's keyword
/// document into the heuristic scores.
///
/// The heuristic scores are first expressed as plain percentages, then each
/// theme becomes `min(100, trunc(0.7 * pct + 0.3 * similarity_pct))`.
pub fn blend_similarity(
    heuristic: &ScoreAccumulator,
    tokens: &[String],
    tables: &CategoryTables,
    weights: &HeuristicWeights,
) -> Result<ScoreAccumulator, AnalysisError> {
    let text_doc = tokens.join(" ");
    let mut docs = Vec::with_capacity(tables.themes.len() + 1);
    docs.push(text_doc.clone());
    docs.extend(tables.themes.iter().map(|t| t.keywords.join(" ")));

    let vectorizer = TfidfVectorizer::new(VectorizerConfig {
        ngram_range: (1, 2),
        min_df: DocFrequency::Count(2),
        max_df: DocFrequency::Ratio(0.85),
        ..VectorizerConfig::default()
    });
    let matrix = vectorizer.fit_transform(&docs)?;

    let similarity_weight = (weights.similarity_base_weight
        + tokens.len() / weights.similarity_tokens_per_point.max(1))
    .min(weights.similarity_max_weight) as f64;

    let war_terms = war::SIMILARITY_TERMS
        .iter()
        .filter(|t| text_doc.contains(*t))
        .count();

    let total = heuristic.total();
    let mut blended = ScoreAccumulator::new(heuristic.labels());

    for (i, theme) in tables.themes.iter().enumerate() {
        let similarity = matrix.cosine(0, i + 1);
        let mut similarity_pct = (similarity * similarity_weight).trunc() as i64;

        if theme.label == WAR_CONFLICT && war_terms >= weights.war_similarity_min_terms {
            similarity_pct +=
                (war_terms as i64 * weights.war_similarity_per_term).min(weights.war_similarity_max);
        }

        let heuristic_pct = if total > 0.0 {
            (100.0 * heuristic.get(&theme.label) / total).round_ties_even()
        } else {
            0.0
        };

        let value = (heuristic_pct * weights.heuristic_share
            + similarity_pct as f64 * weights.similarity_share)
            .trunc()
            .clamp(0.0, 100.0);
        blended.add(&theme.label, value);
    }

    debug!(similarity_weight, war_terms, "Blended TF-IDF theme similarity");
    Ok(blended)
}

/// Overlapping character windows over `text`, starting every `stride`
/// characters. The tail windows are shorter.
pub fn proximity_windows(text: &str, width: usize, stride: usize) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    (0..chars.len())
        .step_by(stride.max(1))
        .map(|start| chars[start..(start + width).min(chars.len())].iter().collect())
        .collect()
}

/// Distinct tokens with their counts, in first-occurrence order.
fn distinct_counts(tokens: &[String]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<(String, usize)> = Vec::new();
    for token in tokens {
        match index.get(token.as_str()) {
            Some(&i) => out[i].1 += 1,
            None => {
                index.insert(token.as_str(), out.len());
                out.push((token.clone(), 1));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::themes::{LOVE, NATURE};
    use crate::lexicon::{NoLexicon, Thesaurus};

    fn tables() -> CategoryTables {
        CategoryTables::standard().unwrap()
    }

    fn toks(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_windows_overlap() {
        let text = "a".repeat(250);
        let windows = proximity_windows(&text, 200, 100);
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].len(), 200);
        assert_eq!(windows[1].len(), 150);
        assert_eq!(windows[2].len(), 50);
    }

    #[test]
    fn test_windows_empty_text() {
        assert!(proximity_windows("", 200, 100).is_empty());
    }

    #[test]
    fn test_exact_match_scores_theme() {
        let t = tables();
        let acc = heuristic_theme_scores(
            "kiss",
            &toks(&["kiss"]),
            &t,
            &NoLexicon,
            &HeuristicWeights::default(),
        );
        // exact 1.0; "kiss" is too short for prefix matches; one-word window
        assert!((acc.get(LOVE) - 1.0).abs() < 1e-9, "got {}", acc.get(LOVE));
        assert_eq!(acc.get(NATURE), 0.0);
    }

    #[test]
    fn test_war_indicator_weighs_more() {
        let t = tables();
        let acc = heuristic_theme_scores(
            "guns",
            &toks(&["guns"]),
            &t,
            &NoLexicon,
            &HeuristicWeights::default(),
        );
        // 1.5 exact; window: "guns", "gun" both substrings → 2 theme words,
        // one window signal → weak 2 × 0.6
        assert!((acc.get(WAR_CONFLICT) - 2.7).abs() < 1e-9, "got {}", acc.get(WAR_CONFLICT));
    }

    #[test]
    fn test_prefix_match_on_long_words() {
        let t = tables();
        let acc = heuristic_theme_scores(
            "romances",
            &toks(&["romances"]),
            &t,
            &NoLexicon,
            &HeuristicWeights::default(),
        );
        // "romances" starts with "romance" (+0.5); "romantic" shares no prefix.
        // Window holds "romance" only → no proximity bonus.
        assert!((acc.get(LOVE) - 0.5).abs() < 1e-9, "got {}", acc.get(LOVE));
    }

    #[test]
    fn test_synonym_similarity_adds() {
        let t = tables();
        let lexicon = Thesaurus::builtin().unwrap();
        let with_lexicon = heuristic_theme_scores(
            "skirmish",
            &toks(&["skirmish"]),
            &t,
            &lexicon,
            &HeuristicWeights::default(),
        );
        let without = heuristic_theme_scores(
            "skirmish",
            &toks(&["skirmish"]),
            &t,
            &NoLexicon,
            &HeuristicWeights::default(),
        );
        assert!(with_lexicon.get(WAR_CONFLICT) > without.get(WAR_CONFLICT));
    }

    #[test]
    fn test_heuristic_is_deterministic() {
        let t = tables();
        let lexicon = Thesaurus::builtin().unwrap();
        let text = "the soldier remembered the battle and the love he left behind";
        let tokens = toks(&["soldier", "remembered", "battle", "love", "left", "behind"]);
        let a = heuristic_theme_scores(text, &tokens, &t, &lexicon, &HeuristicWeights::default());
        let b = heuristic_theme_scores(text, &tokens, &t, &lexicon, &HeuristicWeights::default());
        assert_eq!(a, b);
    }

    #[test]
    fn test_blend_caps_and_truncates() {
        let t = tables();
        let mut heuristic = ScoreAccumulator::new(&t.theme_labels());
        heuristic.add(LOVE, 10.0);
        let tokens: Vec<String> = "love heart romance passion kiss embrace beloved desire warmth"
            .split(' ')
            .map(String::from)
            .cycle()
            .take(30)
            .collect();
        let blended =
            blend_similarity(&heuristic, &tokens, &t, &HeuristicWeights::default()).unwrap();
        // Love: 0.7 × 100 plus a positive similarity share
        let love = blended.get(LOVE);
        assert!(love >= 70.0 && love <= 100.0, "got {love}");
        assert_eq!(love, love.trunc());
        assert!(blended.get(LOVE) > blended.get(NATURE));
    }
}
