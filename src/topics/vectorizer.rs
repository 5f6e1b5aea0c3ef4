// TF-IDF vectorizer over a small document collection.
//
// Terms are lower-cased word tokens and, with an n-gram range above 1,
// space-joined runs of adjacent tokens. Document-frequency bounds prune the
// vocabulary, `max_features` keeps the terms with the highest corpus
// frequency, and every row is L2-normalized so a dot product is a cosine.
//
// idf(t) = ln((1 + n) / (1 + df(t))) + 1   (smoothed)
// tf(t)  = count, or 1 + ln(count) with sublinear scaling

use std::collections::{BTreeMap, HashMap, HashSet};

use unicode_segmentation::UnicodeSegmentation;

use crate::error::AnalysisError;
use crate::text::tokens::StopWords;

/// A document-frequency bound: an absolute count or a share of documents.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DocFrequency {
    Count(usize),
    Ratio(f64),
}

impl DocFrequency {
    fn resolve(self, n_docs: usize) -> f64 {
        match self {
            DocFrequency::Count(c) => c as f64,
            DocFrequency::Ratio(r) => r * n_docs as f64,
        }
    }
}

/// Vectorizer parameters.
#[derive(Debug, Clone)]
pub struct VectorizerConfig {
    /// Smallest and largest n-gram length
    pub ngram_range: (usize, usize),
    pub min_df: DocFrequency,
    pub max_df: DocFrequency,
    /// Keep only this many terms, by total count across the corpus
    pub max_features: Option<usize>,
    pub sublinear_tf: bool,
    /// Tokens shorter than this many characters are dropped
    pub min_token_chars: usize,
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            ngram_range: (1, 1),
            min_df: DocFrequency::Count(1),
            max_df: DocFrequency::Ratio(1.0),
            max_features: None,
            sublinear_tf: false,
            min_token_chars: 2,
        }
    }
}

/// Fits a vocabulary and weights documents against it.
pub struct TfidfVectorizer<'a> {
    config: VectorizerConfig,
    stop_words: Option<&'a StopWords>,
}

impl<'a> TfidfVectorizer<'a> {
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            stop_words: None,
        }
    }

    /// Drop stop words before n-grams are formed.
    pub fn with_stop_words(mut self, stop_words: &'a StopWords) -> Self {
        self.stop_words = Some(stop_words);
        self
    }

    /// Token stream for one document.
    pub fn tokenize(&self, doc: &str) -> Vec<String> {
        doc.to_lowercase()
            .unicode_words()
            .flat_map(|w| w.split(|c: char| !(c.is_alphanumeric() || c == '_')))
            .filter(|t| t.chars().count() >= self.config.min_token_chars)
            .filter(|t| self.stop_words.is_none_or(|sw| !sw.contains(t)))
            .map(str::to_string)
            .collect()
    }

    /// Every n-gram term in one document, in order.
    pub fn analyze(&self, doc: &str) -> Vec<String> {
        let tokens = self.tokenize(doc);
        let (lo, hi) = self.config.ngram_range;
        let mut terms = Vec::new();
        for n in lo.max(1)..=hi {
            if n > tokens.len() {
                break;
            }
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }

    /// Learn the vocabulary from `docs` and return their weighted rows.
    pub fn fit_transform<S: AsRef<str>>(&self, docs: &[S]) -> Result<TfidfMatrix, AnalysisError> {
        if docs.is_empty() {
            return Err(AnalysisError::Vectorization("no documents to vectorize".into()));
        }
        let n_docs = docs.len();

        let counts: Vec<HashMap<String, usize>> = docs
            .iter()
            .map(|d| {
                let mut c: HashMap<String, usize> = HashMap::new();
                for term in self.analyze(d.as_ref()) {
                    *c.entry(term).or_insert(0) += 1;
                }
                c
            })
            .collect();

        // Sorted vocabulary: term → (document frequency, corpus count)
        let mut stats: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
        for doc in &counts {
            for (term, &count) in doc {
                let entry = stats.entry(term.as_str()).or_insert((0, 0));
                entry.0 += 1;
                entry.1 += count;
            }
        }
        if stats.is_empty() {
            return Err(AnalysisError::Vectorization(
                "empty vocabulary; documents contain only stop words or short tokens".into(),
            ));
        }

        let max_doc = self.config.max_df.resolve(n_docs);
        let min_doc = self.config.min_df.resolve(n_docs);
        if max_doc < min_doc {
            return Err(AnalysisError::Vectorization(
                "max_df corresponds to fewer documents than min_df".into(),
            ));
        }

        let mut kept: Vec<(&str, usize, usize)> = stats
            .into_iter()
            .filter(|(_, (df, _))| (*df as f64) >= min_doc && (*df as f64) <= max_doc)
            .map(|(term, (df, total))| (term, df, total))
            .collect();

        if let Some(limit) = self.config.max_features {
            if kept.len() > limit {
                // Stable: equal counts stay in alphabetical order
                let mut by_count = kept.clone();
                by_count.sort_by(|a, b| b.2.cmp(&a.2));
                let keep: HashSet<&str> = by_count.iter().take(limit).map(|t| t.0).collect();
                kept.retain(|t| keep.contains(t.0));
            }
        }

        if kept.is_empty() {
            return Err(AnalysisError::Vectorization(
                "no terms remain after document-frequency pruning".into(),
            ));
        }

        let vocabulary: Vec<String> = kept.iter().map(|t| t.0.to_string()).collect();
        let idf: Vec<f64> = kept
            .iter()
            .map(|(_, df, _)| ((1.0 + n_docs as f64) / (1.0 + *df as f64)).ln() + 1.0)
            .collect();

        let rows = counts
            .iter()
            .map(|doc| {
                let mut row: Vec<f64> = vocabulary
                    .iter()
                    .zip(&idf)
                    .map(|(term, w)| match doc.get(term) {
                        Some(&c) if c > 0 => self.term_frequency(c) * w,
                        _ => 0.0,
                    })
                    .collect();
                l2_normalize(&mut row);
                row
            })
            .collect();

        Ok(TfidfMatrix { vocabulary, rows })
    }

    fn term_frequency(&self, count: usize) -> f64 {
        if self.config.sublinear_tf {
            1.0 + (count as f64).ln()
        } else {
            count as f64
        }
    }
}

fn l2_normalize(row: &mut [f64]) {
    let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
    if norm > 0.0 {
        for v in row.iter_mut() {
            *v /= norm;
        }
    }
}

/// Dense document-term matrix with L2-normalized rows.
#[derive(Debug, Clone)]
pub struct TfidfMatrix {
    vocabulary: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl TfidfMatrix {
    /// Terms in column order (alphabetical).
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn n_docs(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.rows[i]
    }

    /// Cosine similarity between two documents.
    pub fn cosine(&self, a: usize, b: usize) -> f64 {
        cosine_similarity(&self.rows[a], &self.rows[b])
    }

    /// Per-term weight summed over all documents, in column order.
    pub fn column_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.vocabulary.len()];
        for row in &self.rows {
            for (s, v) in sums.iter_mut().zip(row) {
                *s += v;
            }
        }
        sums
    }
}

/// Cosine similarity between two vectors. Zero vectors have similarity 0.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let na = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let nb = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if na == 0.0 || nb == 0.0 {
        0.0
    } else {
        dot / (na * nb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bigram_config() -> VectorizerConfig {
        VectorizerConfig {
            ngram_range: (1, 2),
            ..VectorizerConfig::default()
        }
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        assert_eq!(v.tokenize("I saw a Red-Fox"), vec!["saw", "red", "fox"]);
    }

    #[test]
    fn test_analyze_unigrams_then_bigrams() {
        let v = TfidfVectorizer::new(bigram_config());
        assert_eq!(
            v.analyze("red fox runs"),
            vec!["red", "fox", "runs", "red fox", "fox runs"]
        );
    }

    #[test]
    fn test_stop_words_removed_before_ngrams() {
        let sw = StopWords::from_words(["the"]);
        let v = TfidfVectorizer::new(bigram_config()).with_stop_words(&sw);
        assert_eq!(v.analyze("the red the fox"), vec!["red", "fox", "red fox"]);
    }

    #[test]
    fn test_vocabulary_sorted() {
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        let m = v.fit_transform(&["zebra apple", "mango"]).unwrap();
        assert_eq!(m.vocabulary(), &["apple", "mango", "zebra"]);
    }

    #[test]
    fn test_rows_are_unit_length() {
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        let m = v.fit_transform(&["cat cat dog", "dog bird"]).unwrap();
        for i in 0..m.n_docs() {
            let norm: f64 = m.row(i).iter().map(|x| x * x).sum::<f64>().sqrt();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_smoothed_idf_weights() {
        // "cat" in both docs: idf 1.0; "dog" in one: ln(3/2) + 1
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        let m = v.fit_transform(&["cat dog", "cat"]).unwrap();
        let row = m.row(0);
        let dog_idf = (3.0f64 / 2.0).ln() + 1.0;
        let norm = (1.0 + dog_idf * dog_idf).sqrt();
        assert!((row[0] - 1.0 / norm).abs() < 1e-9);
        assert!((row[1] - dog_idf / norm).abs() < 1e-9);
    }

    #[test]
    fn test_min_df_prunes_rare_terms() {
        let config = VectorizerConfig {
            min_df: DocFrequency::Count(2),
            ..VectorizerConfig::default()
        };
        let v = TfidfVectorizer::new(config);
        let m = v.fit_transform(&["cat dog", "cat bird", "fish"]).unwrap();
        assert_eq!(m.vocabulary(), &["cat"]);
    }

    #[test]
    fn test_max_df_prunes_common_terms() {
        let config = VectorizerConfig {
            max_df: DocFrequency::Ratio(0.5),
            ..VectorizerConfig::default()
        };
        let v = TfidfVectorizer::new(config);
        let m = v.fit_transform(&["cat dog", "cat bird"]).unwrap();
        assert_eq!(m.vocabulary(), &["bird", "dog"]);
    }

    #[test]
    fn test_max_features_by_corpus_count_ties_alphabetical() {
        let config = VectorizerConfig {
            max_features: Some(2),
            ..VectorizerConfig::default()
        };
        let v = TfidfVectorizer::new(config);
        let m = v
            .fit_transform(&["pear pear apple", "kiwi fig"])
            .unwrap();
        // pear=2, then apple/fig/kiwi tie at 1 → apple
        assert_eq!(m.vocabulary(), &["apple", "pear"]);
    }

    #[test]
    fn test_sublinear_tf() {
        let config = VectorizerConfig {
            sublinear_tf: true,
            ..VectorizerConfig::default()
        };
        let v = TfidfVectorizer::new(config);
        let m = v.fit_transform(&["cat cat cat dog"]).unwrap();
        // single doc: idf 1 for both; tf cat = 1 + ln 3, dog = 1
        let cat = 1.0 + 3.0f64.ln();
        let norm = (cat * cat + 1.0).sqrt();
        assert!((m.row(0)[0] - cat / norm).abs() < 1e-9);
    }

    #[test]
    fn test_empty_corpus_errors() {
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        let docs: [&str; 0] = [];
        assert!(matches!(
            v.fit_transform(&docs),
            Err(AnalysisError::Vectorization(_))
        ));
    }

    #[test]
    fn test_only_short_tokens_errors() {
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        assert!(v.fit_transform(&["a b c", "d"]).is_err());
    }

    #[test]
    fn test_max_df_below_min_df_errors() {
        let config = VectorizerConfig {
            min_df: DocFrequency::Count(2),
            max_df: DocFrequency::Ratio(0.5),
            ..VectorizerConfig::default()
        };
        let v = TfidfVectorizer::new(config);
        // 2 docs: max 1.0 < min 2.0
        assert!(v.fit_transform(&["cat", "cat"]).is_err());
    }

    #[test]
    fn test_everything_pruned_errors() {
        let config = VectorizerConfig {
            min_df: DocFrequency::Count(2),
            ..VectorizerConfig::default()
        };
        let v = TfidfVectorizer::new(config);
        assert!(v.fit_transform(&["cat", "dog", "bird"]).is_err());
    }

    #[test]
    fn test_cosine_identical_and_disjoint() {
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        let m = v.fit_transform(&["cat dog", "cat dog", "fish"]).unwrap();
        assert!((m.cosine(0, 1) - 1.0).abs() < 1e-9);
        assert_eq!(m.cosine(0, 2), 0.0);
    }

    #[test]
    fn test_column_sums() {
        let v = TfidfVectorizer::new(VectorizerConfig::default());
        let m = v.fit_transform(&["cat", "cat"]).unwrap();
        assert!((m.column_sums()[0] - 2.0).abs() < 1e-9);
    }
}
