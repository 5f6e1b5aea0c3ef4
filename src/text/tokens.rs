// Word tokenization and stop-word filtering.

use std::collections::{HashMap, HashSet};

use stop_words::{get, LANGUAGE};
use unicode_segmentation::UnicodeSegmentation;

/// English stop-word set, loaded once and shared read-only.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The NLTK English list (179 words) from the stop-words crate. Theme
    /// keywords such as "free" and "wish" must stay out of it.
    pub fn english() -> Self {
        let words: Vec<String> = get(LANGUAGE::English);
        Self::from_words(words.into_iter().filter(|w| !w.is_empty()))
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

/// Lower-cased words in order. Words come from Unicode word boundaries and
/// are then split on inner punctuation, so "soldier's" yields "soldier" and
/// "s".
pub fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .unicode_words()
        .flat_map(|w| w.split(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Lower-cased words that are not stop words.
pub fn content_words(text: &str, stop_words: &StopWords) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| !stop_words.contains(w))
        .collect()
}

/// Stable frequency ranking: highest count first, ties keep first-seen order.
pub fn rank_by_frequency<I, S>(items: I) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut ranked: Vec<(String, usize)> = Vec::new();
    let mut position: HashMap<String, usize> = HashMap::new();
    for item in items {
        let item = item.as_ref();
        match position.get(item) {
            Some(&i) => ranked[i].1 += 1,
            None => {
                position.insert(item.to_string(), ranked.len());
                ranked.push((item.to_string(), 1));
            }
        }
    }
    // sort_by is stable, so equal counts stay in first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_lowercases_and_splits() {
        assert_eq!(
            words("The Soldier's torch, held HIGH!"),
            vec!["the", "soldier", "s", "torch", "held", "high"]
        );
    }

    #[test]
    fn test_words_keeps_digits() {
        assert_eq!(words("Step 2: install v3"), vec!["step", "2", "install", "v3"]);
    }

    #[test]
    fn test_words_curly_apostrophe_and_accents() {
        assert_eq!(
            words("Renée\u{2019}s café, naïve: yes"),
            vec!["renée", "s", "café", "naïve", "yes"]
        );
    }

    #[test]
    fn test_content_words_drops_stop_words() {
        let stop = StopWords::from_words(["the", "of"]);
        assert_eq!(
            content_words("The fields of Flanders", &stop),
            vec!["fields", "flanders"]
        );
    }

    #[test]
    fn test_english_stop_words_loaded() {
        let stop = StopWords::english();
        assert!(!stop.is_empty());
        assert!(stop.contains("the"));
        assert!(stop.contains("and"));
    }

    #[test]
    fn test_english_stop_words_keep_theme_vocabulary() {
        let stop = StopWords::english();
        for word in [
            "free", "past", "present", "self", "line", "right", "end", "hell", "wish", "thought",
            "wonder",
        ] {
            assert!(!stop.contains(word), "{word} is filtered");
        }
        assert!(stop.len() < 200);
    }

    #[test]
    fn test_rank_by_frequency_is_stable() {
        let ranked = rank_by_frequency(["b", "a", "b", "c", "a", "d"]);
        assert_eq!(
            ranked,
            vec![
                ("b".to_string(), 2),
                ("a".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 1)
            ]
        );
    }
}
