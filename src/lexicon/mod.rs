// Lexical relations for the heuristic theme scorer.

pub mod thesaurus;
pub mod traits;

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;

pub use thesaurus::Thesaurus;
pub use traits::{Definition, LexicalDatabase, NoLexicon};

/// Open the lexicon at `path`, or the built-in one when no path is given.
pub fn open(path: Option<&Path>) -> Result<Arc<dyn LexicalDatabase>> {
    let thesaurus = match path {
        Some(p) => Thesaurus::load(p)?,
        None => Thesaurus::builtin()?,
    };
    Ok(Arc::new(thesaurus))
}
