// Text primitives: sentence splitting, word tokens, chunking, layout features.

pub mod chunker;
pub mod sentences;
pub mod structure;
pub mod tokens;
