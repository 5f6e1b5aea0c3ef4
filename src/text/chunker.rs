// Sentence-respecting chunker for the context-limited classifier.
//
// Text no longer than the limit is one chunk. Longer text is split into
// sentences which are packed greedily; a sentence is never split, so a single
// sentence longer than the limit becomes its own oversized chunk.

use super::sentences::split_sentences;

/// Default chunk limit in characters. Sized for BART's context window.
pub const DEFAULT_MAX_CHUNK_CHARS: usize = 1024;

/// Split `text` into ordered chunks of at most `max_chars` characters
/// (except for indivisible oversized sentences).
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    if text.chars().count() <= max_chars {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for sentence in split_sentences(text) {
        let sentence_len = sentence.chars().count();
        // Running length counts the joining space after each sentence.
        if current_len + sentence_len < max_chars {
            current.push_str(&sentence);
            current.push(' ');
            current_len += sentence_len + 1;
        } else {
            flush(&mut chunks, &current);
            current = format!("{sentence} ");
            current_len = sentence_len + 1;
        }
    }
    flush(&mut chunks, &current);

    chunks
}

fn flush(chunks: &mut Vec<String>, current: &str) {
    let chunk = current.trim();
    if !chunk.is_empty() {
        chunks.push(chunk.to_string());
    }
}
