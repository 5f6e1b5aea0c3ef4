// Zero-shot classification behind a trait, so the backend can be swapped.
//
// OnnxNliClassifier runs BART-MNLI locally; HostedClassifier calls an
// inference endpoint; StubClassifier is deterministic for tests.

pub mod download;
pub mod hosted;
pub mod onnx;
pub mod stub;
pub mod traits;

pub use traits::{ClassifyOptions, LabelScore, ZeroShotClassifier};

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::config::{ClassifierBackend, Config};

/// Create a classifier for the configured backend.
///
/// Fails when the backend is `none` or is missing what it needs; the caller
/// decides whether that is fatal.
pub fn create_classifier(config: &Config) -> Result<Arc<dyn ZeroShotClassifier>> {
    config.require_classifier()?;
    match config.classifier_backend {
        ClassifierBackend::Onnx => {
            info!("Using local ONNX zero-shot classifier");
            let classifier = onnx::OnnxNliClassifier::load(&config.model_dir)?;
            Ok(Arc::new(classifier))
        }
        ClassifierBackend::Hosted => {
            info!(url = config.hosted_url.as_str(), "Using hosted zero-shot classifier");
            let classifier = hosted::HostedClassifier::new(
                config.hosted_url.clone(),
                Some(config.hf_api_token.clone()),
            );
            Ok(Arc::new(classifier))
        }
        ClassifierBackend::None => anyhow::bail!("No classifier configured"),
    }
}
