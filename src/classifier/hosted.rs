// Hosted zero-shot classifier speaking the HuggingFace inference protocol.
//
// Request: {"inputs": text, "parameters": {"candidate_labels": [...],
// "multi_label": bool, "hypothesis_template": "..."}}
// Response: either {"sequence", "labels", "scores"} or a list of
// {"label", "score"} objects, depending on the serving stack.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{sort_descending, ClassifyOptions, LabelScore, ZeroShotClassifier};

/// Default endpoint for the hosted backend.
pub const DEFAULT_HOSTED_URL: &str =
    "https://api-inference.huggingface.co/models/facebook/bart-large-mnli";

/// Zero-shot classifier backed by a remote inference endpoint.
pub struct HostedClassifier {
    client: Client,
    url: String,
    api_token: Option<String>,
}

impl HostedClassifier {
    pub fn new(url: String, api_token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            url,
            api_token,
        }
    }
}

#[async_trait]
impl ZeroShotClassifier for HostedClassifier {
    fn name(&self) -> &str {
        "hosted"
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

        let request = ZeroShotRequest {
            inputs: text,
            parameters: ZeroShotParameters {
                candidate_labels: labels,
                multi_label: options.multi_label,
                hypothesis_template: &options.hypothesis_template,
            },
        };

        let mut builder = self.client.post(&self.url).json(&request);
        if let Some(token) = &self.api_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .context("Failed to call zero-shot inference endpoint")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Inference endpoint returned {}: {}", status, body);
        }

        let parsed: ZeroShotResponse = response
            .json()
            .await
            .context("Failed to parse zero-shot response")?;

        let mut scores = parsed.into_scores()?;
        sort_descending(&mut scores);

        debug!(
            labels = scores.len(),
            text_preview = crate::output::truncate_chars(text, 50),
            "Hosted classifier scored text"
        );

        Ok(scores)
    }
}

// --- Inference API request/response types ---

#[derive(Serialize)]
struct ZeroShotRequest<'a> {
    inputs: &'a str,
    parameters: ZeroShotParameters<'a>,
}

#[derive(Serialize)]
struct ZeroShotParameters<'a> {
    candidate_labels: &'a [String],
    multi_label: bool,
    hypothesis_template: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ZeroShotResponse {
    Parallel { labels: Vec<String>, scores: Vec<f64> },
    Pairs(Vec<LabelScoreWire>),
}

#[derive(Debug, Deserialize)]
struct LabelScoreWire {
    label: String,
    score: f64,
}

impl ZeroShotResponse {
    fn into_scores(self) -> Result<Vec<LabelScore>> {
        match self {
            Self::Parallel { labels, scores } => {
                if labels.len() != scores.len() {
                    anyhow::bail!(
                        "Zero-shot response has {} labels but {} scores",
                        labels.len(),
                        scores.len()
                    );
                }
                Ok(labels
                    .into_iter()
                    .zip(scores)
                    .map(|(label, score)| LabelScore { label, score })
                    .collect())
            }
            Self::Pairs(pairs) => Ok(pairs
                .into_iter()
                .map(|p| LabelScore {
                    label: p.label,
                    score: p.score,
                })
                .collect()),
        }
    }
}
