// Analysis pipeline: the public operations and the degradation rule that
// connects each primary stage to its fallback.

pub mod analyzer;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::AnalysisError;

pub use analyzer::{Analyzer, TextAnalysis};

/// Which path produced a result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Source {
    /// The preferred stage succeeded (classifier, TF-IDF ranking, blending).
    Primary,
    /// The fallback ran because the preferred stage failed or did not apply.
    Fallback { reason: String },
}

/// A value together with the path that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Scored<T> {
    pub fn primary(value: T) -> Self {
        Self {
            value,
            source: Source::Primary,
        }
    }

    pub fn fallback(value: T, reason: impl Into<String>) -> Self {
        Self {
            value,
            source: Source::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, Source::Fallback { .. })
    }

    /// Transform the value, keeping the source.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Scored<U> {
        Scored {
            value: f(self.value),
            source: self.source,
        }
    }
}

/// Take the primary result, or run `fallback` when it failed.
///
/// This is the only place a stage failure turns into a fallback, so the
/// model → heuristic order is visible and testable in one function.
pub fn degrade<T>(primary: Result<T, AnalysisError>, fallback: impl FnOnce() -> T) -> Scored<T> {
    match primary {
        Ok(value) => Scored::primary(value),
        // Already reported once at startup.
        Err(e @ AnalysisError::ClassifierUnavailable) => {
            debug!("Falling back: {}", e);
            Scored::fallback(fallback(), e.to_string())
        }
        Err(e) => {
            warn!("Falling back: {}", e);
            Scored::fallback(fallback(), e.to_string())
        }
    }
}
