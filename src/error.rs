// Failure taxonomy for the analysis stages.
//
// None of these reach the caller of the public analysis operations except
// MissingInput. Every other variant is caught at the boundary of the stage
// that produced it and turned into "use the next-best result".

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No classifier was loaded at startup. Permanent for the process.
    #[error("zero-shot classifier is not available")]
    ClassifierUnavailable,

    /// A single classifier call failed. Affects only the current request.
    #[error("zero-shot classifier call failed: {0:#}")]
    ClassifierInvocation(anyhow::Error),

    /// A lexical database lookup failed for one word pair.
    #[error("lexical lookup failed for '{word}': {reason}")]
    LexicalLookup { word: String, reason: String },

    /// The TF-IDF fit could not produce a usable vocabulary.
    #[error("term weighting failed: {0}")]
    Vectorization(String),

    /// The caller supplied no text at all.
    #[error("Missing text in request body")]
    MissingInput,
}

impl AnalysisError {
    /// Wrap an arbitrary classifier failure.
    pub fn invocation(err: impl Into<anyhow::Error>) -> Self {
        Self::ClassifierInvocation(err.into())
    }
}
