// System status display: classifier backend, model files, lexicon, tuning.

use anyhow::Result;
use std::path::Path;

use crate::classifier::download::{model_files_present, MODEL_FILE_NAME, TOKENIZER_FILE_NAME};
use crate::config::{ClassifierBackend, Config};
use crate::lexicon::Thesaurus;

/// Display system status to the terminal.
pub fn show(config: &Config) -> Result<()> {
    println!("Classifier backend: {}", config.classifier_backend.as_str());
    match config.classifier_backend {
        ClassifierBackend::Onnx => {
            let dir = &config.model_dir;
            if model_files_present(dir) {
                let size = dir_size(dir, &[MODEL_FILE_NAME, TOKENIZER_FILE_NAME]);
                println!("Model: {} ({})", dir.display(), format_bytes(size));
            } else {
                println!("Model: not downloaded ({})", dir.display());
                println!("  Run `folio download-model` to fetch it");
            }
        }
        ClassifierBackend::Hosted => {
            println!("Endpoint: {}", config.hosted_url);
            if config.hf_api_token.is_empty() {
                println!("API token: not set (HF_API_TOKEN)");
            } else {
                println!("API token: set");
            }
        }
        ClassifierBackend::None => {
            println!("  All analysis uses heuristic scoring");
        }
    }
    if let Err(e) = config.require_classifier() {
        if config.classifier_backend != ClassifierBackend::None {
            println!("  Classifier unavailable, heuristics will be used: {}", e);
        }
    }

    let thesaurus = match &config.lexicon_path {
        Some(path) => Thesaurus::load(path).map(|t| (t, path.display().to_string())),
        None => Thesaurus::builtin().map(|t| (t, "built-in".to_string())),
    };
    match thesaurus {
        Ok((t, origin)) => println!("Lexicon: {} ({} synsets)", origin, t.synset_count()),
        Err(e) => println!("Lexicon: failed to load: {:#}", e),
    }

    match &config.tuning_path {
        Some(path) => println!("Tuning: {}", path.display()),
        None => println!("Tuning: defaults"),
    }
    println!("Max chunk length: {} chars", config.max_chunk_chars);

    Ok(())
}

fn dir_size(dir: &Path, files: &[&str]) -> u64 {
    files
        .iter()
        .filter_map(|f| std::fs::metadata(dir.join(f)).ok())
        .map(|m| m.len())
        .sum()
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
