// Structural features: layout-derived genre signals.
//
// These are independent of vocabulary: short lines suggest verse, quoted
// lines suggest dialogue, numbered or bulleted lines suggest technical
// writing, and a greeting/closing frame suggests a letter.

use serde::Serialize;

/// Words that open a letter.
pub const GREETING_MARKERS: [&str; 1] = ["dear"];

/// Words that close a letter.
pub const CLOSING_MARKERS: [&str; 3] = ["sincerely", "regards", "truly"];

/// How many trailing non-blank lines are searched for a closing marker.
const CLOSING_WINDOW: usize = 5;

/// Layout features of one input text. Computed fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StructuralFeatures {
    /// Mean character length of non-blank lines
    pub avg_line_length: f64,
    /// Blank-line-delimited paragraphs
    pub paragraph_count: usize,
    /// Fraction of non-blank lines containing a double quote
    pub dialogue_ratio: f64,
    /// Fraction of all characters that sit inside double quotes
    pub quoted_text_ratio: f64,
    /// Fraction of non-blank lines starting with "N.", "•" or "-"
    pub technical_ratio: f64,
    /// Emphasis markers (*, _, ==) per non-blank line
    pub formatting_density: f64,
    /// First non-blank line contains a greeting marker
    pub has_greeting: bool,
    /// One of the last five non-blank lines contains a closing marker
    pub has_closing: bool,
    /// Total line count, blank lines included
    pub line_count: usize,
}

impl StructuralFeatures {
    pub fn from_text(text: &str) -> Self {
        let lines: Vec<&str> = text.split('\n').collect();
        let non_blank: Vec<&str> = lines
            .iter()
            .copied()
            .filter(|l| !l.trim().is_empty())
            .collect();

        if non_blank.is_empty() {
            return Self {
                paragraph_count: 1,
                line_count: lines.len(),
                ..Self::default()
            };
        }

        let n = non_blank.len() as f64;

        let total_len: usize = non_blank.iter().map(|l| l.chars().count()).sum();

        let mut paragraph_count = 1;
        for pair in lines.windows(2) {
            if pair[0].trim().is_empty() && !pair[1].trim().is_empty() {
                paragraph_count += 1;
            }
        }

        let dialogue_lines = non_blank.iter().filter(|l| l.contains('"')).count();

        let technical_lines = non_blank
            .iter()
            .filter(|l| is_technical_marker_line(l))
            .count();

        let formatting: usize = non_blank
            .iter()
            .map(|l| l.matches('*').count() + l.matches('_').count() + l.matches("==").count())
            .sum();

        let first = non_blank[0].to_lowercase();
        let has_greeting = GREETING_MARKERS.iter().any(|m| first.contains(m));

        let has_closing = non_blank
            .iter()
            .rev()
            .take(CLOSING_WINDOW)
            .any(|l| {
                let lower = l.to_lowercase();
                CLOSING_MARKERS.iter().any(|m| lower.contains(m))
            });

        Self {
            avg_line_length: total_len as f64 / n,
            paragraph_count,
            dialogue_ratio: dialogue_lines as f64 / n,
            quoted_text_ratio: quoted_ratio(text),
            technical_ratio: technical_lines as f64 / n,
            formatting_density: formatting as f64 / n,
            has_greeting,
            has_closing,
            line_count: lines.len(),
        }
    }

    /// Greeting at the top and closing at the bottom.
    pub fn has_letter_frame(&self) -> bool {
        self.has_greeting && self.has_closing
    }
}

/// "1." / "12." numbering, a bullet, or a dash at the very start of the line.
fn is_technical_marker_line(line: &str) -> bool {
    if line.starts_with('•') || line.starts_with('-') {
        return true;
    }
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    digits > 0 && line[digits..].starts_with('.')
}

/// Share of characters inside double quotes. The opening quote counts as
/// inside; the closing quote does not.
fn quoted_ratio(text: &str) -> f64 {
    let mut total = 0usize;
    let mut quoted = 0usize;
    let mut in_quote = false;
    for c in text.chars() {
        total += 1;
        if c == '"' {
            in_quote = !in_quote;
        }
        if in_quote {
            quoted += 1;
        }
    }
    if total == 0 {
        0.0
    } else {
        quoted as f64 / total as f64
    }
}
