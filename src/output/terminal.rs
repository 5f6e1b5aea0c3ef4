// Colored terminal output for distributions and keyword lists.

use colored::Colorize;

use crate::pipeline::{Scored, Source, TextAnalysis};
use crate::scoring::PercentageDistribution;

const BAR_WIDTH: usize = 20;

/// `[=====     ]` scaled to a percentage.
pub fn bar(percent: u32) -> String {
    let filled = ((percent.min(100) as usize * BAR_WIDTH) + 50) / 100;
    let empty = BAR_WIDTH.saturating_sub(filled);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(empty))
}

/// Display a percentage distribution, highest first.
pub fn display_distribution(title: &str, dist: &PercentageDistribution) {
    println!("\n{}", format!("=== {title} ===").bold());
    println!();

    if dist.is_empty() {
        println!("  {}", "No signal in this text.".dimmed());
        return;
    }

    for (i, (label, percent)) in dist.ranked().into_iter().enumerate() {
        let bar = bar(percent);
        // Color the bar based on share
        let colored_bar = if percent >= 40 {
            bar.bright_green()
        } else if percent >= 15 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };
        println!(
            "  {:>2}. {:<20} {} {:>3}%",
            i + 1,
            label.bold(),
            colored_bar,
            percent
        );
    }
}

/// Display a keyword list in rank order.
pub fn display_keywords(keywords: &[String]) {
    println!("\n{}", format!("=== Keywords ({}) ===", keywords.len()).bold());
    println!();

    if keywords.is_empty() {
        println!("  {}", "No keywords found.".dimmed());
        return;
    }
    for (i, keyword) in keywords.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, keyword);
    }
}

/// One dimmed line naming the path that produced a result, when it was
/// not the primary one.
pub fn display_source<T>(scored: &Scored<T>) {
    if let Source::Fallback { reason } = &scored.source {
        println!("  {}", format!("(fallback: {reason})").dimmed());
    }
}

/// Display the combined analysis.
pub fn display_analysis(analysis: &TextAnalysis) {
    if let Some(error) = &analysis.error {
        println!("{} {}", "Error:".red().bold(), error);
        return;
    }
    display_distribution("Themes", &analysis.themes);
    display_distribution("Genres", &analysis.genres);
    display_keywords(&analysis.keywords);
    println!();
}
