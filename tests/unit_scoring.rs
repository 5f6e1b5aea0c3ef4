// Unit tests for the scoring layer.
//
// Tests isolated pure functions: the accumulator's fixed key set, the
// normalizer's sum and cap invariants, the war-signal booster, and tuning
// overrides.

use folio::categories::themes::{DEATH_MORTALITY, LOVE, NATURE, WAR_CONFLICT};
use folio::categories::CategoryTables;
use folio::scoring::booster::{self, BoostWeights};
use folio::scoring::normalize::{normalize, NormalizerLimits};
use folio::scoring::{ScoreAccumulator, Tuning};

fn labels(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn theme_acc(pairs: &[(&str, f64)]) -> ScoreAccumulator {
    let tables = CategoryTables::standard().unwrap();
    let mut acc = ScoreAccumulator::new(&tables.theme_labels());
    for (label, score) in pairs {
        acc.add(label, *score);
    }
    acc
}

// ============================================================
// ScoreAccumulator: fixed keys, additions only
// ============================================================

#[test]
fn accumulator_starts_at_zero_for_every_label() {
    let acc = ScoreAccumulator::new(&labels(&["A", "B", "C"]));
    assert_eq!(acc.labels().len(), 3);
    assert!(acc.iter().all(|(_, v)| v == 0.0));
    assert_eq!(acc.total(), 0.0);
}

#[test]
fn accumulator_ignores_unknown_labels() {
    let mut acc = ScoreAccumulator::new(&labels(&["A"]));
    acc.add("Z", 5.0);
    assert!(!acc.contains("Z"));
    assert_eq!(acc.labels().len(), 1);
    assert_eq!(acc.total(), 0.0);
}

#[test]
fn accumulator_rejects_negative_and_nan() {
    let mut acc = ScoreAccumulator::new(&labels(&["A"]));
    acc.add("A", 2.0);
    acc.add("A", -1.0);
    acc.add("A", f64::NAN);
    assert!((acc.get("A") - 2.0).abs() < 1e-12);
}

#[test]
fn raise_to_never_lowers() {
    let mut acc = ScoreAccumulator::new(&labels(&["A"]));
    acc.add("A", 4.0);
    acc.raise_to("A", 1.0);
    assert!((acc.get("A") - 4.0).abs() < 1e-12);
    acc.raise_to("A", 6.0);
    assert!((acc.get("A") - 6.0).abs() < 1e-12);
}

// ============================================================
// Normalizer: sum and cap invariants
// ============================================================

#[test]
fn zero_total_gives_empty_distribution() {
    let acc = ScoreAccumulator::new(&labels(&["A", "B"]));
    assert!(normalize(&acc, &NormalizerLimits::default()).is_empty());
}

#[test]
fn sums_to_100_within_label_count() {
    let cases: &[&[f64]] = &[
        &[1.0, 1.0, 1.0],
        &[0.3, 0.3, 0.3, 0.1],
        &[5.0, 3.0, 2.0, 1.0, 1.0, 1.0, 0.5],
        &[0.01, 0.02, 0.03],
    ];
    for scores in cases {
        let names: Vec<String> = (0..scores.len()).map(|i| format!("L{i}")).collect();
        let mut acc = ScoreAccumulator::new(&names);
        for (n, s) in names.iter().zip(scores.iter()) {
            acc.add(n, *s);
        }
        let dist = normalize(&acc, &NormalizerLimits::default());
        let sum = dist.sum() as i64;
        assert!(
            (sum - 100).abs() <= scores.len() as i64,
            "sum {sum} for {scores:?}"
        );
        assert!(dist.iter().all(|(_, v)| v <= 80));
    }
}

#[test]
fn dominant_label_capped_and_runner_up_gains() {
    let mut acc = ScoreAccumulator::new(&labels(&["A", "B", "C"]));
    acc.add("A", 90.0);
    acc.add("B", 6.0);
    acc.add("C", 4.0);
    let dist = normalize(&acc, &NormalizerLimits::default());
    assert_eq!(dist.get("A"), Some(80));
    // freed 10 points, all fit under 100
    assert_eq!(dist.get("B"), Some(16));
    assert_eq!(dist.get("C"), Some(4));
    assert_eq!(dist.sum(), 100);
}

#[test]
fn custom_cap_respected() {
    let mut acc = ScoreAccumulator::new(&labels(&["A", "B"]));
    acc.add("A", 9.0);
    acc.add("B", 1.0);
    let limits = NormalizerLimits {
        cap: 60,
        redistribution_max: 10,
    };
    let dist = normalize(&acc, &limits);
    assert_eq!(dist.get("A"), Some(60));
    assert_eq!(dist.get("B"), Some(20));
}

// ============================================================
// Signal booster: war vocabulary
// ============================================================

#[test]
fn booster_scales_war_with_signal_count() {
    let mut acc = theme_acc(&[(WAR_CONFLICT, 1.0), (LOVE, 1.0)]);
    // war, battle, soldier: 3 signals → ×1.24
    booster::apply(
        &mut acc,
        "the war and the battle took every soldier",
        &BoostWeights::default(),
    );
    assert!((acc.get(WAR_CONFLICT) - 1.24).abs() < 1e-9, "got {}", acc.get(WAR_CONFLICT));
    assert!((acc.get(LOVE) - 1.0).abs() < 1e-12);
}

#[test]
fn booster_multiplier_capped() {
    let mut acc = theme_acc(&[(WAR_CONFLICT, 2.0)]);
    let text = "war battle soldier guns poppies flanders crosses quarrel torch artillery";
    booster::apply(&mut acc, text, &BoostWeights::default());
    // 10 signals would be ×1.8, capped at ×1.25; the defining pair then has
    // nothing else to dominate
    assert!((acc.get(WAR_CONFLICT) - 2.5).abs() < 1e-9);
}

#[test]
fn booster_below_threshold_is_noop() {
    let mut acc = theme_acc(&[(WAR_CONFLICT, 1.0)]);
    booster::apply(&mut acc, "a war and a battle", &BoostWeights::default());
    assert!((acc.get(WAR_CONFLICT) - 1.0).abs() < 1e-12);
}

#[test]
fn defining_pair_forces_war_dominant_and_death_companion() {
    let mut acc = theme_acc(&[(NATURE, 4.0), (WAR_CONFLICT, 1.0), (DEATH_MORTALITY, 0.5)]);
    booster::apply(
        &mut acc,
        "in flanders fields the poppies blow",
        &BoostWeights::default(),
    );
    let war = acc.get(WAR_CONFLICT);
    let death = acc.get(DEATH_MORTALITY);
    assert!(war >= 1.25 * 4.0 - 1e-9, "war {war}");
    assert!(death >= 0.75 * war - 1e-9, "death {death}");
}

#[test]
fn crosses_row_pair_also_defines() {
    assert!(booster::has_defining_pair("between the crosses, row on row"));
    assert!(!booster::has_defining_pair("crosses alone"));
}

// ============================================================
// Tuning: partial overrides
// ============================================================

#[test]
fn tuning_override_changes_only_named_fields() {
    let tuning = Tuning::from_json(r#"{"refiner": {"letter_boost": 25}}"#).unwrap();
    assert_eq!(tuning.refiner.letter_boost, 25);
    assert_eq!(tuning.refiner.poetry_boost, 15);
    assert_eq!(tuning.normalizer.cap, 80);
}

#[test]
fn tuning_missing_file_errors() {
    assert!(Tuning::load(std::path::Path::new("/nonexistent/tuning.json")).is_err());
}
