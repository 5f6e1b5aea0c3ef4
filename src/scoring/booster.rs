// War-poem signal booster.
//
// Zero-shot models and keyword counts both under-weight the vocabulary of
// canonical war poetry. Applied to the raw accumulator of either scorer,
// before normalization. Only ever raises scores.

use serde::Deserialize;
use tracing::debug;

use crate::categories::themes::{war, DEATH_MORTALITY, WAR_CONFLICT};

use super::accumulator::ScoreAccumulator;

/// Constants for the war-signal corrections.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BoostWeights {
    /// Distinct war signals needed before the multiplier applies (default 3)
    pub min_signals: usize,
    /// Multiplier growth per distinct signal (default 0.08)
    pub per_signal: f64,
    /// Largest multiplier increment (default 0.25)
    pub max_boost: f64,
    /// War/Conflict floor relative to the best other theme (default 1.25)
    pub dominance_factor: f64,
    /// Death/Mortality floor relative to War/Conflict (default 0.75)
    pub companion_factor: f64,
}

impl Default for BoostWeights {
    fn default() -> Self {
        Self {
            min_signals: 3,
            per_signal: 0.08,
            max_boost: 0.25,
            dominance_factor: 1.25,
            companion_factor: 0.75,
        }
    }
}

/// Distinct war signals occurring (as substrings) in lower-cased text.
pub fn war_signal_count(lower_text: &str) -> usize {
    war::SIGNALS
        .iter()
        .filter(|s| lower_text.contains(*s))
        .count()
}

/// True when one of the defining word pairs occurs in full.
pub fn has_defining_pair(lower_text: &str) -> bool {
    war::DEFINING_PAIRS
        .iter()
        .any(|(a, b)| lower_text.contains(a) && lower_text.contains(b))
}

/// Apply the war corrections in place. `lower_text` is the whole input,
/// lower-cased.
pub fn apply(acc: &mut ScoreAccumulator, lower_text: &str, weights: &BoostWeights) {
    if !acc.contains(WAR_CONFLICT) {
        return;
    }

    let signals = war_signal_count(lower_text);
    if signals >= weights.min_signals {
        let factor = (weights.per_signal * signals as f64).min(weights.max_boost);
        let war_score = acc.get(WAR_CONFLICT);
        acc.add(WAR_CONFLICT, war_score * factor);
        debug!(signals, factor, "Boosted War/Conflict for war signals");
    }

    if has_defining_pair(lower_text) {
        let floor = acc.max_excluding(WAR_CONFLICT) * weights.dominance_factor;
        acc.raise_to(WAR_CONFLICT, floor);
        if acc.contains(DEATH_MORTALITY) {
            let companion = acc.get(WAR_CONFLICT) * weights.companion_factor;
            acc.raise_to(DEATH_MORTALITY, companion);
        }
        debug!("Defining war pair present, War/Conflict forced dominant");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::themes::LOVE;

    fn theme_acc(war: f64, death: f64, love: f64) -> ScoreAccumulator {
        let labels = vec![
            LOVE.to_string(),
            DEATH_MORTALITY.to_string(),
            WAR_CONFLICT.to_string(),
        ];
        let mut acc = ScoreAccumulator::new(&labels);
        acc.add(WAR_CONFLICT, war);
        acc.add(DEATH_MORTALITY, death);
        acc.add(LOVE, love);
        acc
    }

    #[test]
    fn test_signal_count_is_distinct_presence() {
        assert_eq!(war_signal_count("war war war"), 1);
        // "warrior" also contains "war"
        assert_eq!(war_signal_count("the warrior"), 2);
    }

    #[test]
    fn test_few_signals_no_boost() {
        let mut acc = theme_acc(1.0, 0.0, 0.0);
        apply(&mut acc, "a soldier at war", &BoostWeights::default());
        assert_eq!(acc.get(WAR_CONFLICT), 1.0);
    }

    #[test]
    fn test_multiplier_capped() {
        // army, battle, bomb, enemy, soldier, war, trench → 7 signals → 0.25 cap
        let mut acc = theme_acc(1.0, 0.0, 0.0);
        let text = "army battle bomb enemy soldier war trench";
        apply(&mut acc, text, &BoostWeights::default());
        assert!((acc.get(WAR_CONFLICT) - 1.25).abs() < 1e-9);
    }

    #[test]
    fn test_three_signals_boost() {
        // guns, bomb, army → 0.24
        let mut acc = theme_acc(2.0, 0.0, 0.0);
        apply(&mut acc, "guns bomb army", &BoostWeights::default());
        assert!((acc.get(WAR_CONFLICT) - 2.48).abs() < 1e-9);
    }

    #[test]
    fn test_defining_pair_forces_dominance() {
        let mut acc = theme_acc(0.1, 0.2, 0.8);
        apply(
            &mut acc,
            "in flanders fields the poppies blow",
            &BoostWeights::default(),
        );
        let war_score = acc.get(WAR_CONFLICT);
        assert!((war_score - 1.0).abs() < 1e-9, "got {war_score}");
        assert!((acc.get(DEATH_MORTALITY) - 0.75).abs() < 1e-9);
        assert_eq!(acc.get(LOVE), 0.8);
    }

    #[test]
    fn test_crosses_row_pair() {
        let mut acc = theme_acc(0.0, 0.0, 0.4);
        apply(&mut acc, "between the crosses, row on row", &BoostWeights::default());
        assert!((acc.get(WAR_CONFLICT) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_existing_higher_scores_kept() {
        let mut acc = theme_acc(6.0, 4.5, 1.0);
        apply(&mut acc, "flanders poppies", &BoostWeights::default());
        assert_eq!(acc.get(WAR_CONFLICT), 6.0);
        assert_eq!(acc.get(DEATH_MORTALITY), 4.5);
    }
}
