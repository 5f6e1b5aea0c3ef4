// Folio: theme, genre and keyword analysis for an authoring client.
//
// This is the library root. Each module corresponds to a major subsystem
// of the analysis pipeline.

pub mod categories;
pub mod classifier;
pub mod config;
pub mod error;
pub mod lexicon;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod status;
pub mod text;
pub mod topics;
