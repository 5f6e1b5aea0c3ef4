// Genre vocabulary and structural signatures.
//
// A genre is recognised by two kinds of evidence: keywords (counted with
// positional weighting) and regex patterns over the raw text. Patterns carry
// a tier: distinctive markers such as chapter headings, salutations and
// closings are worth far more than common narrative verbs.

use anyhow::{Context, Result};
use regex_lite::Regex;
use serde::Deserialize;

pub const POETRY: &str = "Poetry";
pub const ESSAY: &str = "Essay";
pub const STORY: &str = "Story";
pub const LETTER: &str = "Letter";
pub const TECHNICAL: &str = "Technical";
pub const ACADEMIC: &str = "Academic";

/// How much a single pattern match contributes to the pattern count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternTier {
    /// Chapter markers, salutations, closings.
    Strong,
    /// Ordinary structural cue.
    Normal,
    /// Dialogue tags and other very common cues.
    Weak,
}

/// How a pattern is evaluated against the text.
#[derive(Debug, Clone)]
pub enum PatternMatcher {
    /// Plain regex, every non-overlapping match counts once.
    Regex(Regex),
    /// Anaphora: a word, a comma or semicolon, whitespace, then the same word
    /// again ("alone, alone"). Matches `word[,;]\s+word` where some suffix of
    /// the first word starts the second.
    RepeatedWord(Regex),
}

impl PatternMatcher {
    pub fn count(&self, text: &str) -> usize {
        match self {
            PatternMatcher::Regex(re) => re.find_iter(text).count(),
            PatternMatcher::RepeatedWord(re) => re
                .captures_iter(text)
                .filter(|caps| {
                    let (Some(first), Some(second)) = (caps.get(1), caps.get(2)) else {
                        return false;
                    };
                    let first = first.as_str();
                    let second = second.as_str();
                    (0..first.len())
                        .filter(|&i| first.is_char_boundary(i))
                        .any(|i| second.starts_with(&first[i..]))
                })
                .count(),
        }
    }
}

/// One compiled genre pattern.
#[derive(Debug, Clone)]
pub struct GenrePattern {
    pub source: &'static str,
    pub matcher: PatternMatcher,
    pub tier: PatternTier,
}

impl GenrePattern {
    /// Number of matches of this pattern in `text`.
    pub fn count(&self, text: &str) -> usize {
        self.matcher.count(text)
    }
}

use PatternTier::{Normal, Strong, Weak};

/// Raw (label, keywords, patterns) triples in display order.
#[allow(clippy::type_complexity)]
pub(crate) fn raw_genres() -> Vec<(
    &'static str,
    Vec<&'static str>,
    Vec<(&'static str, PatternTier)>,
)> {
    vec![
        (
            POETRY,
            vec![
                "verse", "poem", "stanza", "rhyme", "rhythm", "poet", "lyric", "sonnet",
                "metaphor", "imagery", "meter", "quatrain", "couplet", "alliteration",
                "assonance", "consonance", "syllable", "iambic", "trochaic", "anapestic",
                "ballad", "haiku", "limerick", "ode", "epic", "free verse", "poetry", "poet",
            ],
            vec![
                (r"\n\n.*\n\n", Normal),
                // punctuation right before the final newline of the text
                (r#"[,;.!?]['"]?\n\z"#, Normal),
                (r"\s{2,}", Normal),
                (r"\n[A-Z][a-z]", Normal),
                (r"[,;.!?][ ]*\n[A-Z]", Normal),
                (r"\n.*[,;][ ]*\n", Normal),
                (REPEATED_WORD, Normal),
                (r"[a-z]+ing[,;]\s+[a-z]+ing", Normal),
            ],
        ),
        (
            ESSAY,
            vec![
                "argue", "thesis", "point", "evidence", "conclusion", "analysis", "perspective",
                "examination", "discuss", "evaluate", "essay", "argument", "proposition",
                "assert", "claim", "stance", "view", "perspective", "critique", "assessment",
                "judgment", "interpretation", "appraisal", "review", "discourse", "exposition",
                "treatise", "academic", "scholarly",
            ],
            vec![
                (r"^In conclusion,", Normal),
                (r"^Furthermore,", Normal),
                (r"^Therefore,", Normal),
                (r"^Moreover,", Normal),
                (r"^To summarize,", Normal),
                (r"^In summary,", Normal),
                (r"^Thus,", Normal),
                (r"^Consequently,", Normal),
                (r"^However,", Normal),
                (r"^On the other hand,", Normal),
                (r"^For instance,", Normal),
                (r"^For example,", Normal),
                (r"^In contrast,", Normal),
                (r"^Additionally,", Normal),
                (r"^First(ly)?[,.]", Normal),
                (r"^Second(ly)?[,.]", Normal),
                (r"^Third(ly)?[,.]", Normal),
                (r"^Finally[,.]", Normal),
                (r"\([A-Za-z\s]+, \d{4}\)", Normal),
            ],
        ),
        (
            STORY,
            vec![
                "character", "plot", "setting", "narrative", "scene", "protagonist", "fiction",
                "tale", "dialogue", "adventure", "story", "novel", "hero", "villain", "conflict",
                "resolution", "climax", "action", "drama", "suspense", "tension", "flashback",
                "foreshadowing", "narrator", "chapter", "storytelling", "fantasy", "mystery",
                "thriller", "romance", "fiction",
            ],
            vec![
                (r#"".*?""#, Normal),
                (r"said", Weak),
                (r"asked", Weak),
                (r"replied", Normal),
                (r"Chapter \d+", Strong),
                (r"[Hh]e (said|thought|felt|saw|heard|knew)", Weak),
                (r"[Ss]he (said|thought|felt|saw|heard|knew)", Weak),
                (r"[Tt]hey (said|thought|felt|saw|heard|knew)", Weak),
                (r"The \w+ (was|were|had)", Normal),
                (
                    r"[A-Z][a-z]+ (sat|stood|walked|ran|looked|smiled|frowned|nodded)",
                    Normal,
                ),
                (r"[Oo]ne day", Normal),
                (r"[Oo]nce upon a time", Normal),
                (r"[Ll]ong ago", Normal),
                (r"[Tt]he end", Normal),
            ],
        ),
        (
            LETTER,
            vec![
                "dear", "sincerely", "regards", "address", "recipient", "sender", "greeting",
                "closing", "date", "yours", "letter", "correspondence", "mail", "sincerely",
                "faithfully", "cordially", "best wishes", "respectfully", "ps", "postscript",
                "attachment", "enclosure", "reference",
            ],
            vec![
                (r"^Dear\s[A-Z][a-z]+,", Strong),
                (r"Sincerely,", Strong),
                (r"Best regards,", Normal),
                (r"^To whom it may concern", Normal),
                (r"^Yours truly,", Normal),
                (r"^Yours sincerely,", Normal),
                (r"^Respectfully,", Normal),
                (r"^Best wishes,", Normal),
                (r"^Kind regards,", Normal),
                (r"^P\.S\.", Normal),
                (r"\d{1,2}(st|nd|rd|th)? [A-Z][a-z]+ \d{4}", Normal),
                (r"^Re:", Normal),
                (r"^From:", Normal),
                (r"^To:", Normal),
            ],
        ),
        (
            TECHNICAL,
            vec![
                "technical", "specification", "document", "manual", "guide", "documentation",
                "procedure", "protocol", "instruction", "reference", "handbook", "resource",
                "tutorial", "guideline", "standard", "requirement", "implementation",
                "configuration", "installation", "troubleshooting", "operation", "maintenance",
            ],
            vec![
                (r"Figure \d+", Normal),
                (r"Table \d+", Normal),
                (r"Section \d+\.\d+", Normal),
                (r"Step \d+", Normal),
                (r"^\d+\.\d+\s", Normal),
                (r"^• ", Normal),
                (r"^NOTE:", Normal),
                (r"^WARNING:", Normal),
                (r"^CAUTION:", Normal),
                (r"^IMPORTANT:", Normal),
            ],
        ),
        (
            ACADEMIC,
            vec![
                "research", "study", "analysis", "experiment", "methodology", "hypothesis",
                "theory", "framework", "literature", "review", "citation", "reference",
                "publication", "journal", "abstract", "introduction", "method", "result",
                "discussion", "conclusion", "implication", "limitation", "future",
                "investigation",
            ],
            vec![
                (r"(?:et al\.|et\. al)\.,? \d{4}", Normal),
                (r"\([A-Za-z\s]+, \d{4}\)", Normal),
                (r"\([A-Za-z\s]+, \d{4}[a-z]?\)", Normal),
                (r"^\d\. Introduction", Normal),
                (r"^\d\. Literature Review", Normal),
                (r"^\d\. Methodology", Normal),
                (r"^\d\. Results", Normal),
                (r"^\d\. Discussion", Normal),
                (r"^\d\. Conclusion", Normal),
                (r"p < 0\.\d+", Normal),
                (r"[Ff]ig\. \d+", Normal),
                (r"[Tt]able \d+", Normal),
                (r"(?:[Rr]eferences|[Bb]ibliography):", Normal),
            ],
        ),
    ]
}

/// Marker source for the anaphora pattern; compiled to a word-pair regex and
/// checked in code since regex-lite has no backreferences.
const REPEATED_WORD: &str = r"([a-z]+)[;,]\s+\1";

/// Compile one pattern source. Anchors apply to the whole text: `^` is the
/// start of the text, not of each line.
pub(crate) fn compile_pattern(source: &'static str, tier: PatternTier) -> Result<GenrePattern> {
    let matcher = if source == REPEATED_WORD {
        let re = Regex::new(r"([a-z]+)[;,]\s+([a-z]+)")
            .context("Failed to compile repeated-word pattern")?;
        PatternMatcher::RepeatedWord(re)
    } else {
        let re = Regex::new(source)
            .with_context(|| format!("Failed to compile genre pattern {source:?}"))?;
        PatternMatcher::Regex(re)
    };
    Ok(GenrePattern {
        source,
        matcher,
        tier,
    })
}
