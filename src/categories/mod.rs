// Category tables: the immutable theme and genre configuration.
//
// Built once at startup and shared read-only (behind an Arc) by every
// component. Nothing mutates a table after construction.

pub mod genres;
pub mod themes;

use anyhow::Result;

use genres::{compile_pattern, GenrePattern};

/// A theme label and its keyword set.
#[derive(Debug, Clone)]
pub struct ThemeCategory {
    pub label: String,
    /// Distinct keywords, in curated order
    pub keywords: Vec<String>,
}

/// A genre label, its keyword set and its ordered structural patterns.
#[derive(Debug, Clone)]
pub struct GenreCategory {
    pub label: String,
    pub keywords: Vec<String>,
    pub patterns: Vec<GenrePattern>,
}

/// All category configuration used by the analyzers.
#[derive(Debug, Clone)]
pub struct CategoryTables {
    pub themes: Vec<ThemeCategory>,
    pub genres: Vec<GenreCategory>,
}

impl CategoryTables {
    /// The built-in theme and genre tables.
    pub fn standard() -> Result<Self> {
        let themes = themes::raw_themes()
            .into_iter()
            .map(|(label, keywords)| ThemeCategory {
                label: label.to_string(),
                keywords: distinct(&keywords),
            })
            .collect();

        let mut genre_list = Vec::new();
        for (label, keywords, patterns) in genres::raw_genres() {
            let patterns = patterns
                .into_iter()
                .map(|(source, tier)| compile_pattern(source, tier))
                .collect::<Result<Vec<_>>>()?;
            genre_list.push(GenreCategory {
                label: label.to_string(),
                keywords: distinct(&keywords),
                patterns,
            });
        }

        Ok(Self {
            themes,
            genres: genre_list,
        })
    }

    pub fn theme_labels(&self) -> Vec<String> {
        self.themes.iter().map(|t| t.label.clone()).collect()
    }

    pub fn genre_labels(&self) -> Vec<String> {
        self.genres.iter().map(|g| g.label.clone()).collect()
    }

    pub fn theme(&self, label: &str) -> Option<&ThemeCategory> {
        self.themes.iter().find(|t| t.label == label)
    }

    /// Every theme keyword, flattened across themes. A word listed under
    /// several themes appears once per theme.
    pub fn all_theme_keywords(&self) -> Vec<&str> {
        self.themes
            .iter()
            .flat_map(|t| t.keywords.iter().map(String::as_str))
            .collect()
    }
}

fn distinct(words: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        if !out.iter().any(|w| w == word) {
            out.push(word.to_string());
        }
    }
    out
}
