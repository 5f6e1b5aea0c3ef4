use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::classifier::hosted::DEFAULT_HOSTED_URL;
use crate::text::chunker::DEFAULT_MAX_CHUNK_CHARS;

/// Which zero-shot classifier backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifierBackend {
    /// Local ONNX NLI model (default). No network needed once downloaded.
    Onnx,
    /// Hosted zero-shot inference endpoint.
    Hosted,
    /// No classifier: every request takes the heuristic path.
    None,
}

impl ClassifierBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Onnx => "onnx",
            Self::Hosted => "hosted",
            Self::None => "none",
        }
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded at startup via dotenvy, before this runs.
#[derive(Debug, Clone)]
pub struct Config {
    pub classifier_backend: ClassifierBackend,
    /// Directory containing the NLI model and tokenizer
    pub model_dir: PathBuf,
    pub hosted_url: String,
    /// Bearer token for the hosted backend (HF_API_TOKEN)
    pub hf_api_token: String,
    /// JSON synset file; None means the built-in lexicon
    pub lexicon_path: Option<PathBuf>,
    pub max_chunk_chars: usize,
    /// Optional JSON file overriding tuning constants
    pub tuning_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables. Everything has a
    /// default, so this only fails on values that do not parse.
    pub fn load() -> Result<Self> {
        let classifier_backend = match env::var("FOLIO_CLASSIFIER").as_deref() {
            Ok("hosted") => ClassifierBackend::Hosted,
            Ok("none") => ClassifierBackend::None,
            // "onnx" or unset both default to ONNX
            _ => ClassifierBackend::Onnx,
        };

        let model_dir = env::var("FOLIO_MODEL_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| crate::classifier::download::default_model_dir());

        let max_chunk_chars = match env::var("FOLIO_MAX_CHUNK_CHARS") {
            Ok(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("FOLIO_MAX_CHUNK_CHARS is not a number: {raw}"))?,
            Err(_) => DEFAULT_MAX_CHUNK_CHARS,
        };
        if max_chunk_chars == 0 {
            anyhow::bail!("FOLIO_MAX_CHUNK_CHARS must be greater than zero");
        }

        Ok(Self {
            classifier_backend,
            model_dir,
            hosted_url: env::var("FOLIO_HOSTED_URL")
                .unwrap_or_else(|_| DEFAULT_HOSTED_URL.to_string()),
            hf_api_token: env::var("HF_API_TOKEN").unwrap_or_default(),
            lexicon_path: non_empty_path("FOLIO_LEXICON_PATH"),
            max_chunk_chars,
            tuning_path: non_empty_path("FOLIO_TUNING_PATH"),
        })
    }

    /// Validate that the chosen classifier backend has what it needs.
    /// For ONNX: model files must exist (or user should run download-model).
    /// For hosted: the API token must be set.
    pub fn require_classifier(&self) -> Result<()> {
        match self.classifier_backend {
            ClassifierBackend::Onnx => {
                if !crate::classifier::download::model_files_present(&self.model_dir) {
                    anyhow::bail!(
                        "ONNX model files not found in {}\n\
                         Run `folio download-model` to download them.\n\
                         Or set FOLIO_CLASSIFIER=hosted to use the hosted inference API instead.",
                        self.model_dir.display()
                    );
                }
                Ok(())
            }
            ClassifierBackend::Hosted => {
                if self.hf_api_token.is_empty() {
                    anyhow::bail!(
                        "HF_API_TOKEN not set. Add it to your .env file to use the hosted classifier."
                    );
                }
                Ok(())
            }
            ClassifierBackend::None => {
                anyhow::bail!("FOLIO_CLASSIFIER=none: classification runs on heuristics only")
            }
        }
    }
}

fn non_empty_path(var: &str) -> Option<PathBuf> {
    env::var(var)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
}
