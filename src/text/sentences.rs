// Sentence segmentation.
//
// A sentence ends at a run of terminal punctuation (. ! ?), optionally
// followed by closing quotes or brackets, when the next character is
// whitespace or the end of the text. Known abbreviations and single-letter
// initials do not end a sentence. Newlines alone never split a sentence.

const ABBREVIATIONS: [&str; 22] = [
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "vs", "etc", "e.g", "i.e", "fig",
    "vol", "ch", "sec", "inc", "ltd", "jan", "feb", "approx",
];

const CLOSERS: [char; 7] = ['"', '\'', ')', ']', '\u{201d}', '\u{2019}', '}'];

/// Split `text` into trimmed, non-empty sentences in order.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        current.push(ch);
        i += 1;

        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }

        // Absorb the rest of a terminator run ("?!", "...") and closers.
        while i < chars.len() && (matches!(chars[i], '.' | '!' | '?') || CLOSERS.contains(&chars[i]))
        {
            current.push(chars[i]);
            i += 1;
        }

        let at_boundary = i >= chars.len() || chars[i].is_whitespace();
        if at_boundary && !ends_with_abbreviation(&current) {
            let sentence = current.trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            current.clear();
        }
    }

    let rest = current.trim();
    if !rest.is_empty() {
        sentences.push(rest.to_string());
    }

    sentences
}

/// True when the text ends with "<abbrev>." or a single-letter initial.
fn ends_with_abbreviation(current: &str) -> bool {
    let trimmed = current.trim_end();
    if !trimmed.ends_with('.') || trimmed.ends_with("..") {
        return false;
    }
    let last_word = trimmed
        .split_whitespace()
        .last()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    let stem = last_word.trim_end_matches('.');

    let mut stem_chars = stem.chars();
    if let (Some(c), None) = (stem_chars.next(), stem_chars.next()) {
        // "J." in "J. R. Smith", but not the pronoun "I."
        return c.is_uppercase() && c != 'I';
    }

    let lower = stem.to_lowercase();
    ABBREVIATIONS.contains(&lower.as_str())
}
