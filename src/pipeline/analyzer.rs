// The three public analysis operations plus the combined one.
//
// Themes: chunks → zero-shot classifier (three templates) or heuristic
// scorer → war-signal booster → normalizer.
// Genres: chunks → zero-shot classifier (one template) or legacy scorer →
// normalizer → sharpening → structural refiner.
// Keywords: TF-IDF ranking or frequency fallback, independent of the above.
//
// None of these fail. Every stage error is turned into the next-best result
// by `degrade`; the only caller-visible error is missing input.

use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::categories::CategoryTables;
use crate::classifier::{self, ZeroShotClassifier};
use crate::config::{ClassifierBackend, Config};
use crate::error::AnalysisError;
use crate::lexicon::{self, LexicalDatabase};
use crate::scoring::genres::{legacy_genre_scores, sharpen, GENRE_TEMPLATE};
use crate::scoring::model::zero_shot_scores;
use crate::scoring::normalize::normalize;
use crate::scoring::refine::refine;
use crate::scoring::themes::{blend_similarity, heuristic_theme_scores, THEME_TEMPLATES};
use crate::scoring::{booster, PercentageDistribution, ScoreAccumulator, Tuning};
use crate::text::chunker::{chunk_text, DEFAULT_MAX_CHUNK_CHARS};
use crate::text::sentences::split_sentences;
use crate::text::structure::StructuralFeatures;
use crate::text::tokens::{content_words, StopWords};
use crate::topics::keywords::{proper_nouns, KeywordExtractor};

use super::{degrade, Scored};

/// Result of the combined analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextAnalysis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub themes: PercentageDistribution,
    pub genres: PercentageDistribution,
    pub keywords: Vec<String>,
}

impl TextAnalysis {
    fn missing_input() -> Self {
        Self {
            error: Some(AnalysisError::MissingInput.to_string()),
            themes: PercentageDistribution::empty(),
            genres: PercentageDistribution::empty(),
            keywords: Vec::new(),
        }
    }
}

/// Shared, read-only analysis context. Safe to use from concurrent requests.
pub struct Analyzer {
    tables: Arc<CategoryTables>,
    classifier: Option<Arc<dyn ZeroShotClassifier>>,
    lexicon: Arc<dyn LexicalDatabase>,
    stop_words: StopWords,
    tuning: Tuning,
    max_chunk_chars: usize,
}

impl Analyzer {
    /// Heuristic-only analyzer with default tuning.
    pub fn new(tables: Arc<CategoryTables>, lexicon: Arc<dyn LexicalDatabase>) -> Self {
        Self {
            tables,
            classifier: None,
            lexicon,
            stop_words: StopWords::english(),
            tuning: Tuning::default(),
            max_chunk_chars: DEFAULT_MAX_CHUNK_CHARS,
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn ZeroShotClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn with_max_chunk_chars(mut self, max_chunk_chars: usize) -> Self {
        self.max_chunk_chars = max_chunk_chars.max(1);
        self
    }

    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Build everything the configuration describes.
    ///
    /// A classifier that cannot be created is logged, not fatal: the analyzer
    /// then runs on the heuristic path for its whole lifetime. A bad lexicon
    /// or tuning file is fatal.
    pub fn from_config(config: &Config) -> Result<Self> {
        let tables = Arc::new(CategoryTables::standard().context("Failed to build category tables")?);
        let lexicon = lexicon::open(config.lexicon_path.as_deref())?;
        let tuning = match &config.tuning_path {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };

        let mut analyzer = Self::new(tables, lexicon)
            .with_tuning(tuning)
            .with_max_chunk_chars(config.max_chunk_chars);

        if config.classifier_backend == ClassifierBackend::None {
            info!("Classifier disabled, using heuristic scoring only");
            return Ok(analyzer);
        }
        match classifier::create_classifier(config) {
            Ok(c) => analyzer = analyzer.with_classifier(c),
            Err(e) => warn!(
                "{}; using heuristic scoring only: {:#}",
                AnalysisError::ClassifierUnavailable,
                e
            ),
        }
        Ok(analyzer)
    }

    /// Name of the loaded classifier backend, if any.
    pub fn classifier_name(&self) -> Option<&str> {
        self.classifier.as_deref().map(|c| c.name())
    }

    pub fn tables(&self) -> &CategoryTables {
        &self.tables
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    // ---- themes ----

    pub async fn analyze_themes(&self, text: &str) -> PercentageDistribution {
        self.analyze_themes_scored(text).await.value
    }

    /// Theme percentages and which path produced them.
    pub async fn analyze_themes_scored(&self, text: &str) -> Scored<PercentageDistribution> {
        if text.trim().is_empty() {
            return Scored::fallback(PercentageDistribution::empty(), "empty input");
        }
        let labels = self.tables.theme_labels();
        let lower = text.to_lowercase();

        let primary = self.model_scores(text, &labels, &THEME_TEMPLATES).await;
        let scored = degrade(primary, || self.heuristic_themes(&lower));

        scored.map(|mut acc| {
            booster::apply(&mut acc, &lower, &self.tuning.boost);
            normalize(&acc, &self.tuning.normalizer)
        })
    }

    /// Heuristic theme scores, blended with TF-IDF similarity when the text
    /// is long enough. A failed blend keeps the unblended scores.
    fn heuristic_themes(&self, lower: &str) -> ScoreAccumulator {
        let weights = &self.tuning.heuristic;
        let tokens = content_words(lower, &self.stop_words);
        let raw = heuristic_theme_scores(
            lower,
            &tokens,
            &self.tables,
            self.lexicon.as_ref(),
            weights,
        );

        if tokens.len() <= weights.similarity_min_tokens {
            debug!(tokens = tokens.len(), "Too few tokens for similarity blending");
            return raw;
        }
        let blended = blend_similarity(&raw, &tokens, &self.tables, weights);
        degrade(blended, || raw).value
    }

    // ---- genres ----

    pub async fn analyze_genres(&self, text: &str) -> PercentageDistribution {
        self.analyze_genres_scored(text).await.value
    }

    /// Genre percentages and which path produced them.
    pub async fn analyze_genres_scored(&self, text: &str) -> Scored<PercentageDistribution> {
        if text.trim().is_empty() {
            return Scored::fallback(PercentageDistribution::empty(), "empty input");
        }
        let labels = self.tables.genre_labels();
        let features = StructuralFeatures::from_text(text);
        let tuning = &self.tuning;

        let primary = self.model_scores(text, &labels, &[GENRE_TEMPLATE]).await;
        let scored = degrade(primary, || {
            legacy_genre_scores(text, &features, &self.tables, &tuning.genre)
        });

        scored.map(|acc| {
            let mut dist = normalize(&acc, &tuning.normalizer);
            sharpen(&mut dist, &tuning.sharpening);
            refine(&dist, &features, &tuning.refiner, &tuning.normalizer)
        })
    }

    // ---- keywords ----

    pub fn extract_keywords(&self, text: &str) -> Vec<String> {
        self.extract_keywords_scored(text).value
    }

    /// Keywords and whether TF-IDF ranking or the frequency fallback
    /// produced them.
    pub fn extract_keywords_scored(&self, text: &str) -> Scored<Vec<String>> {
        if text.trim().is_empty() {
            return Scored::fallback(Vec::new(), "empty input");
        }
        let extractor = KeywordExtractor::new(&self.tables, &self.stop_words);
        let sentences = split_sentences(text);
        let nouns = proper_nouns(&sentences, &self.stop_words);

        let ranked = extractor.tfidf_keywords(&sentences, &nouns);
        degrade(ranked, || extractor.frequency_keywords(text, &nouns))
    }

    // ---- combined ----

    /// Themes, genres and keywords in one call. `None` is the only input
    /// that produces an error, and even then the result is well-formed.
    pub async fn analyze_text(&self, text: Option<&str>) -> TextAnalysis {
        let Some(text) = text else {
            return TextAnalysis::missing_input();
        };
        TextAnalysis {
            error: None,
            themes: self.analyze_themes(text).await,
            genres: self.analyze_genres(text).await,
            keywords: self.extract_keywords(text),
        }
    }

    /// Zero-shot scores over the chunked text, or why they are unavailable.
    async fn model_scores(
        &self,
        text: &str,
        labels: &[String],
        templates: &[&str],
    ) -> Result<ScoreAccumulator, AnalysisError> {
        let classifier = self
            .classifier
            .as_deref()
            .ok_or(AnalysisError::ClassifierUnavailable)?;
        let chunks = chunk_text(text, self.max_chunk_chars);
        debug!(chunks = chunks.len(), "Chunked text for classification");
        zero_shot_scores(classifier, &chunks, labels, templates).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::genres::{LETTER, POETRY};
    use crate::categories::themes::{LOVE, NATURE};
    use crate::classifier::stub::StubClassifier;
    use crate::lexicon::NoLexicon;
    use crate::pipeline::Source;

    fn analyzer() -> Analyzer {
        Analyzer::new(
            Arc::new(CategoryTables::standard().unwrap()),
            Arc::new(NoLexicon),
        )
    }

    #[tokio::test]
    async fn test_whitespace_input_skips_classifier() {
        let stub = Arc::new(StubClassifier::uniform(0.5));
        let a = analyzer().with_classifier(stub.clone());
        assert!(a.analyze_themes("   \n").await.is_empty());
        assert!(a.analyze_genres("").await.is_empty());
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_no_classifier_uses_heuristic() {
        let scored = analyzer()
            .analyze_themes_scored("Love, my love, the heart of my beloved.")
            .await;
        assert!(scored.is_fallback());
        assert_eq!(scored.value.top().map(|(l, _)| l), Some(LOVE));
    }

    #[tokio::test]
    async fn test_model_path_calls_each_template() {
        let stub = Arc::new(StubClassifier::uniform(0.1).with_score(NATURE, 0.9));
        let a = analyzer().with_classifier(stub.clone());
        let scored = a.analyze_themes_scored("The river bends under the hill.").await;
        assert_eq!(scored.source, Source::Primary);
        assert_eq!(scored.value.top().map(|(l, _)| l), Some(NATURE));
        assert_eq!(stub.calls(), THEME_TEMPLATES.len());
    }

    #[tokio::test]
    async fn test_failing_classifier_falls_back_for_genres() {
        let a = analyzer().with_classifier(Arc::new(StubClassifier::failing("boom")));
        let text = "Dear Alice,\n\n\
                    It has been far too long since we last spoke, and I think of you often these days, \
                    especially when the weather turns cold.\n\n\
                    Your old neighbours still ask about you every week, and I tell them you are happy \
                    and busy with the new house by the sea.\n\n\
                    Sincerely,\nBob";
        let scored = a.analyze_genres_scored(text).await;
        assert!(scored.is_fallback());
        assert_eq!(scored.value.top().map(|(l, _)| l), Some(LETTER));
    }

    #[tokio::test]
    async fn test_genre_model_path_single_template() {
        let stub = Arc::new(StubClassifier::uniform(0.1).with_score(POETRY, 0.8));
        let a = analyzer().with_classifier(stub.clone());
        let dist = a.analyze_genres("a short line\nanother short line").await;
        assert_eq!(stub.calls(), 1);
        assert_eq!(dist.top().map(|(l, _)| l), Some(POETRY));
    }

    #[tokio::test]
    async fn test_missing_input_is_reported() {
        let out = analyzer().analyze_text(None).await;
        assert_eq!(out.error.as_deref(), Some("Missing text in request body"));
        assert!(out.themes.is_empty() && out.genres.is_empty() && out.keywords.is_empty());
    }

    #[test]
    fn test_keywords_short_text_use_fallback() {
        let scored = analyzer().extract_keywords_scored("Quiet morning rain. Quiet morning tea.");
        assert!(scored.is_fallback());
        assert_eq!(scored.value.first().map(String::as_str), Some("quiet morning"));
    }
}
