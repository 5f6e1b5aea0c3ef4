// Keyword extraction.
//
// Primary path (more than two sentences): TF-IDF over the sentences, the
// strongest terms re-ranked by how many theme words share a sentence with
// them, topped up with repeated proper nouns. Fallback path: frequent
// bigrams, then frequent unigrams not already covered, then repeated proper
// nouns.

use tracing::debug;
use unicode_segmentation::UnicodeSegmentation;

use crate::categories::CategoryTables;
use crate::error::AnalysisError;
use crate::text::sentences::split_sentences;
use crate::text::tokens::{content_words, rank_by_frequency, StopWords};

use super::vectorizer::{DocFrequency, TfidfVectorizer, VectorizerConfig};

/// Longest keyword list ever returned.
pub const MAX_KEYWORDS: usize = 15;

/// TF-IDF ranking needs more sentences than this.
pub const MIN_SENTENCES_EXCLUSIVE: usize = 2;

const TFIDF_MAX_FEATURES: usize = 30;
const TFIDF_CANDIDATES: usize = 15;
const TFIDF_KEEP: usize = 12;
/// Bonus per theme word sharing a sentence with a candidate term.
const CONTEXT_WEIGHT: f64 = 0.5;
const MAX_PROPER_NOUNS: usize = 3;
const FALLBACK_BIGRAMS: usize = 5;
const FALLBACK_UNIGRAMS: usize = 10;
/// Filtered tokens must be longer than this.
const MIN_TOKEN_CHARS_EXCLUSIVE: usize = 3;
/// Proper nouns must be longer than this.
const MIN_PROPER_NOUN_CHARS_EXCLUSIVE: usize = 2;

/// Extracts up to MAX_KEYWORDS salient terms from a text.
pub struct KeywordExtractor<'a> {
    tables: &'a CategoryTables,
    stop_words: &'a StopWords,
}

impl<'a> KeywordExtractor<'a> {
    pub fn new(tables: &'a CategoryTables, stop_words: &'a StopWords) -> Self {
        Self { tables, stop_words }
    }

    /// TF-IDF ranking with theme-context bonuses.
    ///
    /// Fails when there are too few sentences or the vectorizer finds no
    /// usable vocabulary; callers then use `frequency_keywords`.
    pub fn tfidf_keywords(
        &self,
        sentences: &[String],
        proper_nouns: &[String],
    ) -> Result<Vec<String>, AnalysisError> {
        if sentences.len() <= MIN_SENTENCES_EXCLUSIVE {
            return Err(AnalysisError::Vectorization(format!(
                "{} sentences, need more than {}",
                sentences.len(),
                MIN_SENTENCES_EXCLUSIVE
            )));
        }

        let lower: Vec<String> = sentences.iter().map(|s| s.to_lowercase()).collect();

        let vectorizer = TfidfVectorizer::new(VectorizerConfig {
            ngram_range: (1, 2),
            min_df: DocFrequency::Count(1),
            max_df: DocFrequency::Ratio(0.8),
            max_features: Some(TFIDF_MAX_FEATURES),
            sublinear_tf: true,
            min_token_chars: MIN_TOKEN_CHARS_EXCLUSIVE + 1,
        })
        .with_stop_words(self.stop_words);
        let matrix = vectorizer.fit_transform(&lower)?;

        let mut ranked: Vec<(String, f64)> = matrix
            .vocabulary()
            .iter()
            .cloned()
            .zip(matrix.column_sums())
            .collect();
        sort_by_score(&mut ranked);
        ranked.truncate(TFIDF_CANDIDATES);

        let theme_words = self.tables.all_theme_keywords();
        let theme_hits: Vec<usize> = lower
            .iter()
            .map(|s| theme_words.iter().filter(|w| s.contains(*w)).count())
            .collect();

        let mut enhanced: Vec<(String, f64)> = ranked
            .into_iter()
            .map(|(term, score)| {
                let bonus: f64 = lower
                    .iter()
                    .zip(&theme_hits)
                    .filter(|(s, _)| s.contains(term.as_str()))
                    .map(|(_, &hits)| CONTEXT_WEIGHT * hits as f64)
                    .sum();
                (term, score * (1.0 + bonus))
            })
            .collect();
        sort_by_score(&mut enhanced);

        let mut keywords: Vec<String> = enhanced
            .into_iter()
            .take(TFIDF_KEEP)
            .map(|(term, _)| term)
            .collect();

        let fresh: Vec<&String> = proper_nouns
            .iter()
            .filter(|n| !contains_ignore_case(&keywords, n))
            .collect();
        for (noun, count) in rank_by_frequency(fresh).into_iter().take(MAX_PROPER_NOUNS) {
            if count > 1 && keywords.len() < MAX_KEYWORDS {
                keywords.push(noun);
            }
        }

        Ok(keywords)
    }

    /// Frequency-based keywords: bigrams first, then uncovered unigrams,
    /// then repeated proper nouns.
    pub fn frequency_keywords(&self, text: &str, proper_nouns: &[String]) -> Vec<String> {
        let tokens: Vec<String> = content_words(&text.to_lowercase(), self.stop_words)
            .into_iter()
            .filter(|t| t.chars().count() > MIN_TOKEN_CHARS_EXCLUSIVE)
            .collect();

        let bigrams = tokens
            .windows(2)
            .filter(|pair| pair.iter().all(|t| t.chars().count() > 2))
            .map(|pair| format!("{} {}", pair[0], pair[1]));

        let mut keywords: Vec<String> = rank_by_frequency(bigrams)
            .into_iter()
            .take(FALLBACK_BIGRAMS)
            .map(|(bigram, _)| bigram)
            .collect();

        for (word, _) in rank_by_frequency(&tokens)
            .into_iter()
            .take(FALLBACK_UNIGRAMS)
        {
            if keywords.len() < MAX_KEYWORDS && !keywords.iter().any(|k| k.contains(&word)) {
                keywords.push(word);
            }
        }

        for (noun, count) in rank_by_frequency(proper_nouns)
            .into_iter()
            .take(MAX_PROPER_NOUNS)
        {
            if count > 1 && keywords.len() < MAX_KEYWORDS && !contains_ignore_case(&keywords, &noun)
            {
                keywords.push(noun);
            }
        }

        keywords.truncate(MAX_KEYWORDS);
        keywords
    }

    /// Full extraction: TF-IDF when it applies, otherwise frequency.
    pub fn extract(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }
        let sentences = split_sentences(text);
        let nouns = proper_nouns(&sentences, self.stop_words);

        match self.tfidf_keywords(&sentences, &nouns) {
            Ok(keywords) => keywords,
            Err(e) => {
                debug!("Keyword TF-IDF skipped, using frequencies: {}", e);
                self.frequency_keywords(text, &nouns)
            }
        }
    }
}

/// Capitalized words that do not open their sentence, in order of
/// appearance (repeats included).
pub fn proper_nouns(sentences: &[String], stop_words: &StopWords) -> Vec<String> {
    let mut nouns = Vec::new();
    for sentence in sentences {
        let words = sentence
            .unicode_words()
            .map(|w| {
                w.strip_suffix("'s")
                    .or_else(|| w.strip_suffix("\u{2019}s"))
                    .unwrap_or(w)
            })
            .filter(|w| !w.is_empty());

        for word in words.skip(1) {
            if is_likely_proper_noun(word, stop_words) {
                nouns.push(word.to_string());
            }
        }
    }
    nouns
}

fn is_likely_proper_noun(word: &str, stop_words: &StopWords) -> bool {
    let Some(first) = word.chars().next() else {
        return false;
    };
    first.is_uppercase()
        && word.chars().count() > MIN_PROPER_NOUN_CHARS_EXCLUSIVE
        && !stop_words.contains(&word.to_lowercase())
}

fn contains_ignore_case(list: &[String], word: &str) -> bool {
    let lower = word.to_lowercase();
    list.iter().any(|k| k.to_lowercase() == lower)
}

/// Highest score first; equal scores keep their current order.
fn sort_by_score(items: &mut [(String, f64)]) {
    items.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn term_counts(terms: &[String]) -> HashMap<&str, usize> {
        let mut counts = HashMap::new();
        for t in terms {
            *counts.entry(t.as_str()).or_insert(0) += 1;
        }
        counts
    }

    fn setup() -> (CategoryTables, StopWords) {
        (CategoryTables::standard().unwrap(), StopWords::english())
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_proper_nouns_skip_sentence_start() {
        let sw = StopWords::english();
        let sentences = strings(&["Alice met Bob in Paris.", "Then Bob left."]);
        let nouns = proper_nouns(&sentences, &sw);
        assert_eq!(nouns, vec!["Bob", "Paris", "Bob"]);
    }

    #[test]
    fn test_proper_nouns_strip_possessive() {
        let sw = StopWords::english();
        let nouns = proper_nouns(&strings(&["We saw Martha's garden."]), &sw);
        assert_eq!(nouns, vec!["Martha"]);
    }

    #[test]
    fn test_empty_text_has_no_keywords() {
        let (t, sw) = setup();
        let ex = KeywordExtractor::new(&t, &sw);
        assert!(ex.extract("").is_empty());
        assert!(ex.extract("   \n\t ").is_empty());
    }

    #[test]
    fn test_two_sentences_use_fallback() {
        let (t, sw) = setup();
        let ex = KeywordExtractor::new(&t, &sw);
        let text = "Silver rivers wander through silver valleys. Silver rivers carry ancient songs.";
        let sentences = split_sentences(text);
        assert!(ex.tfidf_keywords(&sentences, &[]).is_err());
        let keywords = ex.extract(text);
        assert_eq!(keywords, ex.frequency_keywords(text, &[]));
        assert_eq!(keywords[0], "silver rivers");
    }

    #[test]
    fn test_fallback_skips_unigrams_inside_bigrams() {
        let (t, sw) = setup();
        let ex = KeywordExtractor::new(&t, &sw);
        let keywords = ex.frequency_keywords("garden roses garden roses bloom", &[]);
        // every unigram already appears inside a bigram
        assert_eq!(keywords, strings(&["garden roses", "roses garden", "roses bloom"]));
    }

    #[test]
    fn test_fallback_adds_repeated_proper_nouns_only() {
        let (t, sw) = setup();
        let ex = KeywordExtractor::new(&t, &sw);
        let nouns = strings(&["Lisbon", "Lisbon", "Porto"]);
        let keywords = ex.frequency_keywords("quiet harbour evening", &nouns);
        assert!(keywords.contains(&"Lisbon".to_string()));
        assert!(!keywords.contains(&"Porto".to_string()));
    }

    #[test]
    fn test_tfidf_path_bounded_and_distinct() {
        let (t, sw) = setup();
        let ex = KeywordExtractor::new(&t, &sw);
        let text = "The lighthouse keeper watched the storm. Waves broke against the lighthouse. \
                    Margaret climbed the stairs with a lantern. The storm faded before dawn. \
                    Margaret slept while the lighthouse lantern burned.";
        let keywords = ex.extract(text);
        assert!(!keywords.is_empty());
        assert!(keywords.len() <= MAX_KEYWORDS);
        let counts = term_counts(&keywords);
        assert!(counts.values().all(|&c| c == 1), "duplicates in {keywords:?}");
        assert!(keywords.iter().any(|k| k.contains("lighthouse")));
    }

    #[test]
    fn test_tfidf_appends_repeated_proper_nouns() {
        let (t, sw) = setup();
        let ex = KeywordExtractor::new(&t, &sw);
        let sentences = strings(&[
            "We walked with Theodora today.",
            "Later we found Theodora reading.",
            "Evening came quietly.",
        ]);
        let nouns = proper_nouns(&sentences, &sw);
        let keywords = ex.tfidf_keywords(&sentences, &nouns).unwrap();
        // either ranked by TF-IDF or appended as a repeated name, never both
        let theodoras = keywords
            .iter()
            .filter(|k| k.eq_ignore_ascii_case("theodora"))
            .count();
        assert_eq!(theodoras, 1);
    }
}
