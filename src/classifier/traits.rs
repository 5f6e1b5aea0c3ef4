// Zero-shot classifier trait.
//
// The analyzer only ever asks one question: "given this text and these
// candidate labels, how well does each label fit?" The default implementation
// runs an NLI model locally through ONNX; a hosted inference API and a
// deterministic stub implement the same trait.

use anyhow::Result;
use async_trait::async_trait;

/// Hypothesis template used when the caller does not supply one.
pub const DEFAULT_HYPOTHESIS_TEMPLATE: &str = "This example is {}.";

/// One candidate label and its score in [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

/// Per-call options, mirroring the zero-shot pipeline parameters.
#[derive(Debug, Clone)]
pub struct ClassifyOptions {
    /// Score each label independently instead of as a distribution over labels
    pub multi_label: bool,
    /// Template containing `{}` where the label is substituted
    pub hypothesis_template: String,
}

impl Default for ClassifyOptions {
    fn default() -> Self {
        Self {
            multi_label: true,
            hypothesis_template: DEFAULT_HYPOTHESIS_TEMPLATE.to_string(),
        }
    }
}

impl ClassifyOptions {
    pub fn with_template(template: &str) -> Self {
        Self {
            hypothesis_template: template.to_string(),
            ..Self::default()
        }
    }

    /// Phrase `label` as a natural-language hypothesis.
    pub fn hypothesis(&self, label: &str) -> String {
        self.hypothesis_template.replace("{}", label)
    }
}

/// Trait for zero-shot text classification. Implementations must be async
/// because the hosted backend is an HTTP call and the local backend offloads
/// inference to a blocking thread.
#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Short backend name for logs and status output.
    fn name(&self) -> &str;

    /// Score every candidate label against `text`. The result covers all
    /// labels, highest score first.
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
        options: &ClassifyOptions,
    ) -> Result<Vec<LabelScore>>;
}

/// Sort scores highest first, keeping input order among ties.
pub fn sort_descending(scores: &mut [LabelScore]) {
    scores.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
