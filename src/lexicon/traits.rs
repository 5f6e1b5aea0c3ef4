// Lexical database port: synonyms, word similarity, definitions.

use anyhow::Result;

/// One sense of a word with its gloss.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    /// Part of speech tag ("n", "v", "a", "r")
    pub pos: String,
    pub gloss: String,
}

/// Any source of word relations. Implementations are synchronous: lookups
/// are in-memory and cheap compared to model inference.
pub trait LexicalDatabase: Send + Sync {
    /// Lemmas sharing a sense with `word`, excluding `word` itself.
    fn synonyms(&self, word: &str) -> Result<Vec<String>>;

    /// Best similarity in [0, 1] between any senses of `a` and `b`, or None
    /// when the words are unknown or unrelated.
    fn similarity(&self, a: &str, b: &str) -> Result<Option<f64>>;

    /// Glosses for every sense of `word`.
    fn definitions(&self, word: &str) -> Result<Vec<Definition>>;
}

/// A lexicon that knows no words.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLexicon;

impl LexicalDatabase for NoLexicon {
    fn synonyms(&self, _word: &str) -> Result<Vec<String>> {
        Ok(Vec::new())
    }

    fn similarity(&self, _a: &str, _b: &str) -> Result<Option<f64>> {
        Ok(None)
    }

    fn definitions(&self, _word: &str) -> Result<Vec<Definition>> {
        Ok(Vec::new())
    }
}
