// Deterministic classifier for tests and offline runs.
//
// Returns fixed per-label scores regardless of the text, or fails every call.
// Counts invocations so callers can check whether the model was consulted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use async_trait::async_trait;

use super::traits::{sort_descending, ClassifyOptions, LabelScore, ZeroShotClassifier};

/// Classifier that answers from a fixed score table.
pub struct StubClassifier {
    scores: HashMap<String, f64>,
    default_score: f64,
    fail_with: Option<String>,
    calls: AtomicUsize,
}

impl StubClassifier {
    /// Every label scores `default_score` unless overridden with `with_score`.
    pub fn uniform(default_score: f64) -> Self {
        Self {
            scores: HashMap::new(),
            default_score,
            fail_with: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Build from (label, score) pairs; unlisted labels score 0.
    pub fn from_scores(pairs: &[(&str, f64)]) -> Self {
        let mut stub = Self::uniform(0.0);
        for (label, score) in pairs {
            stub.scores.insert(label.to_string(), *score);
        }
        stub
    }

    /// A classifier whose every call fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::uniform(0.0)
        }
    }

    pub fn with_score(mut self, label: &str, score: f64) -> Self {
        self.scores.insert(label.to_string(), score);
        self
    }

    /// Number of `classify` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ZeroShotClassifier for StubClassifier {
    fn name(&self) -> &str {
        "stub"
    }

    async fn classify(
        &self,
        _text: &str,
        labels: &[String],
        _options: &ClassifyOptions,
    ) -> Result<Vec<LabelScore>> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(message) = &self.fail_with {
            anyhow::bail!("{}", message);
        }

        let mut scores: Vec<LabelScore> = labels
            .iter()
            .map(|label| LabelScore {
                label: label.clone(),
                score: self
                    .scores
                    .get(label)
                    .copied()
                    .unwrap_or(self.default_score),
            })
            .collect();
        sort_descending(&mut scores);
        Ok(scores)
    }
}
