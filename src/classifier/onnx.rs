// Local ONNX zero-shot classifier built on an NLI model (BART-large-MNLI).
//
// Zero-shot classification through NLI: the text is the premise, each
// candidate label is phrased as a hypothesis ("This text is about Love."),
// and the model's entailment logit says how well the label fits. All label
// hypotheses for one text run as a single padded batch.
//
// Model: Xenova/bart-large-mnli (quantized ONNX export)
// Output: [batch, 3] logits in the order contradiction, neutral, entailment.

use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ort::session::Session;
use ort::value::Tensor;
use tokenizers::Tokenizer;
use tracing::debug;

use super::download::{MODEL_FILE_NAME, TOKENIZER_FILE_NAME};
use super::traits::{sort_descending, ClassifyOptions, LabelScore, ZeroShotClassifier};

/// Index of the contradiction logit in the model output.
const CONTRADICTION_INDEX: usize = 0;
/// Index of the entailment logit in the model output.
const ENTAILMENT_INDEX: usize = 2;
/// Logits per (premise, hypothesis) pair.
const NLI_OUTPUTS: usize = 3;
/// BART pad token id.
const PAD_TOKEN_ID: i64 = 1;

/// Local ONNX-based zero-shot classifier.
pub struct OnnxNliClassifier {
    // ort::Session::run takes &mut self and spawn_blocking needs 'static,
    // hence Arc<Mutex<_>>.
    session: Arc<Mutex<Session>>,
    tokenizer: Arc<Tokenizer>,
}

impl OnnxNliClassifier {
    /// Load the ONNX model and tokenizer from the given directory.
    ///
    /// Expects the quantized model and `tokenizer.json` in `model_dir`.
    /// Run `folio download-model` first if they don't exist.
    pub fn load(model_dir: &Path) -> Result<Self> {
        let model_path = model_dir.join(MODEL_FILE_NAME);
        let tokenizer_path = model_dir.join(TOKENIZER_FILE_NAME);

        if !model_path.exists() {
            anyhow::bail!(
                "Model file not found: {}\nRun `folio download-model` to download it.",
                model_path.display()
            );
        }
        if !tokenizer_path.exists() {
            anyhow::bail!(
                "Tokenizer file not found: {}\nRun `folio download-model` to download it.",
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(&model_path)
            .with_context(|| format!("Failed to load ONNX model from {}", model_path.display()))?;

        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow::anyhow!("Failed to load tokenizer: {}", e))?;

        debug!("Loaded NLI model from {}", model_dir.display());

        Ok(Self {
            session: Arc::new(Mutex::new(session)),
            tokenizer: Arc::new(tokenizer),
        })
    }
}

#[async_trait]
impl ZeroShotClassifier for OnnxNliClassifier {
    fn name(&self) -> &str {
        "onnx"
    }

    async fn classify(
        &self,
        text: &str,
        labels: &[String],
        options: &ClassifyOptions,
    ) -> Result<Vec<LabelScore>> {
        if labels.is_empty() {
            return Ok(Vec::new());
        }

        let session = Arc::clone(&self.session);
        let tokenizer = Arc::clone(&self.tokenizer);
        let premise = text.to_string();
        let hypotheses: Vec<String> = labels.iter().map(|l| options.hypothesis(l)).collect();
        let labels = labels.to_vec();
        let multi_label = options.multi_label;

        // Tokenization and inference are CPU-bound; keep them off the runtime.
        tokio::task::spawn_blocking(move || {
            let logits = run_nli(&session, &tokenizer, &premise, &hypotheses)?;
            let mut scores = scores_from_logits(&labels, &logits, multi_label);
            sort_descending(&mut scores);
            debug!(
                labels = scores.len(),
                top = scores.first().map(|s| s.label.as_str()).unwrap_or(""),
                "NLI classified chunk"
            );
            Ok(scores)
        })
        .await
        .context("spawn_blocking panicked")?
    }
}

/// Run one batch of (premise, hypothesis) pairs. Returns raw logits, one
/// row of NLI_OUTPUTS per hypothesis.
fn run_nli(
    session: &Arc<Mutex<Session>>,
    tokenizer: &Arc<Tokenizer>,
    premise: &str,
    hypotheses: &[String],
) -> Result<Vec<[f64; NLI_OUTPUTS]>> {
    let encodings: Vec<_> = hypotheses
        .iter()
        .map(|h| {
            tokenizer
                .encode((premise, h.as_str()), true)
                .map_err(|e| anyhow::anyhow!("Tokenization failed: {}", e))
        })
        .collect::<Result<Vec<_>>>()?;

    let batch_size = encodings.len();
    let max_len = encodings
        .iter()
        .map(|e| e.get_ids().len())
        .max()
        .unwrap_or(0);

    let mut input_ids_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);
    let mut attention_mask_flat: Vec<i64> = Vec::with_capacity(batch_size * max_len);

    for enc in &encodings {
        let seq_len = enc.get_ids().len();
        input_ids_flat.extend(enc.get_ids().iter().map(|&id| id as i64));
        attention_mask_flat.extend(enc.get_attention_mask().iter().map(|&m| m as i64));

        let pad_len = max_len - seq_len;
        input_ids_flat.extend(std::iter::repeat_n(PAD_TOKEN_ID, pad_len));
        attention_mask_flat.extend(std::iter::repeat_n(0i64, pad_len));
    }

    let shape = [batch_size as i64, max_len as i64];

    let input_ids_tensor = Tensor::from_array((shape, input_ids_flat))
        .context("Failed to create input_ids tensor")?;
    let attention_mask_tensor = Tensor::from_array((shape, attention_mask_flat))
        .context("Failed to create attention_mask tensor")?;

    let data = {
        let mut session = session
            .lock()
            .map_err(|e| anyhow::anyhow!("Session lock poisoned: {}", e))?;

        let outputs = session
            .run(ort::inputs! {
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor
            })
            .context("ONNX inference failed")?;

        let (_shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .context("Failed to extract logits tensor")?;

        data.to_vec()
    };

    if data.len() != batch_size * NLI_OUTPUTS {
        anyhow::bail!(
            "Unexpected NLI output size {} for batch of {}",
            data.len(),
            batch_size
        );
    }

    Ok(data
        .chunks_exact(NLI_OUTPUTS)
        .map(|row| [row[0] as f64, row[1] as f64, row[2] as f64])
        .collect())
}

/// Turn NLI logits into label scores.
///
/// Multi-label: each label independently, softmax over (contradiction,
/// entailment) and keep entailment. Single-label: softmax of the entailment
/// logits across all labels.
fn scores_from_logits(
    labels: &[String],
    logits: &[[f64; NLI_OUTPUTS]],
    multi_label: bool,
) -> Vec<LabelScore> {
    let scores: Vec<f64> = if multi_label {
        logits
            .iter()
            .map(|row| softmax(&[row[CONTRADICTION_INDEX], row[ENTAILMENT_INDEX]])[1])
            .collect()
    } else {
        let entailment: Vec<f64> = logits.iter().map(|row| row[ENTAILMENT_INDEX]).collect();
        softmax(&entailment)
    };

    labels
        .iter()
        .zip(scores)
        .map(|(label, score)| LabelScore {
            label: label.clone(),
            score,
        })
        .collect()
}

/// Numerically stable softmax.
fn softmax(values: &[f64]) -> Vec<f64> {
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = values.iter().map(|v| (v - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    if sum == 0.0 || !sum.is_finite() {
        return vec![0.0; values.len()];
    }
    exps.into_iter().map(|e| e / sum).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_softmax_sums_to_one() {
        let s = softmax(&[1.0, 2.0, 3.0]);
        assert!((s.iter().sum::<f64>() - 1.0).abs() < 1e-10);
        assert!(s[2] > s[1] && s[1] > s[0]);
    }

    #[test]
    fn test_softmax_equal_inputs() {
        let s = softmax(&[0.0, 0.0]);
        assert!((s[0] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_softmax_large_values_stable() {
        let s = softmax(&[1000.0, 1000.0]);
        assert!((s[0] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_multi_label_ignores_neutral() {
        // Equal contradiction and entailment → 0.5 regardless of neutral
        let logits = vec![[1.0, 50.0, 1.0]];
        let scores = scores_from_logits(&labels(&["Love"]), &logits, true);
        assert!((scores[0].score - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_multi_label_scores_independent() {
        let logits = vec![[-3.0, 0.0, 3.0], [-3.0, 0.0, 3.0]];
        let scores = scores_from_logits(&labels(&["A", "B"]), &logits, true);
        assert!(scores[0].score > 0.99);
        assert!(scores[1].score > 0.99);
    }

    #[test]
    fn test_single_label_scores_form_distribution() {
        let logits = vec![[0.0, 0.0, 2.0], [0.0, 0.0, 1.0], [0.0, 0.0, 0.0]];
        let scores = scores_from_logits(&labels(&["A", "B", "C"]), &logits, false);
        let sum: f64 = scores.iter().map(|s| s.score).sum();
        assert!((sum - 1.0).abs() < 1e-10);
        assert!(scores[0].score > scores[1].score);
    }
}
