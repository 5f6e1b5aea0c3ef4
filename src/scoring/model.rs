// Model-based scoring: zero-shot classification averaged over chunks and
// hypothesis templates.

use tracing::debug;

use crate::classifier::{ClassifyOptions, ZeroShotClassifier};
use crate::error::AnalysisError;

use super::accumulator::ScoreAccumulator;

/// Classify every chunk once per template (multi-label) and average.
///
/// Each chunk's score for a label is the mean over templates; the final score
/// is the mean over chunks. Any failed call fails the whole computation so
/// the caller can fall back without mixing model and heuristic scores.
pub async fn zero_shot_scores(
    classifier: &dyn ZeroShotClassifier,
    chunks: &[String],
    labels: &[String],
    templates: &[&str],
) -> Result<ScoreAccumulator, AnalysisError> {
    let mut acc = ScoreAccumulator::new(labels);
    if chunks.is_empty() || templates.is_empty() {
        return Ok(acc);
    }

    let per_call_weight = 1.0 / (chunks.len() * templates.len()) as f64;

    for (i, chunk) in chunks.iter().enumerate() {
        for template in templates {
            let options = ClassifyOptions::with_template(template);
            let scores = classifier
                .classify(chunk, labels, &options)
                .await
                .map_err(AnalysisError::invocation)?;
            for s in scores {
                acc.add(&s.label, s.score * per_call_weight);
            }
        }
        debug!(
            chunk = i + 1,
            of = chunks.len(),
            backend = classifier.name(),
            "Classified chunk"
        );
    }

    Ok(acc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::stub::StubClassifier;

    fn labels() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[tokio::test]
    async fn test_averages_over_chunks_and_templates() {
        let stub = StubClassifier::from_scores(&[("A", 0.9), ("B", 0.3)]);
        let chunks = vec!["one".to_string(), "two".to_string()];
        let acc = zero_shot_scores(&stub, &chunks, &labels(), &["t1 {}", "t2 {}", "t3 {}"])
            .await
            .unwrap();
        assert!((acc.get("A") - 0.9).abs() < 1e-9);
        assert!((acc.get("B") - 0.3).abs() < 1e-9);
        assert_eq!(stub.calls(), 6);
    }

    #[tokio::test]
    async fn test_failure_is_invocation_error() {
        let stub = StubClassifier::failing("boom");
        let chunks = vec!["one".to_string()];
        let err = zero_shot_scores(&stub, &chunks, &labels(), &["{}"])
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::ClassifierInvocation(_)));
    }
}
