// Percentage normalization with dominant-label capping.
//
// percentage = round(100 * score / total). When one label ends up above the
// cap it is clamped, and the freed points (bounded by the headroom left under
// 100 and by `redistribution_max`) go to the runner-up.

use serde::Deserialize;

use super::accumulator::{PercentageDistribution, ScoreAccumulator};

/// Limits applied after the raw percentages are computed.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NormalizerLimits {
    /// No label may exceed this percentage (default 80)
    pub cap: u32,
    /// Most points moved to the runner-up after capping (default 10)
    pub redistribution_max: u32,
}

impl Default for NormalizerLimits {
    fn default() -> Self {
        Self {
            cap: 80,
            redistribution_max: 10,
        }
    }
}

/// Convert raw scores into a percentage distribution.
///
/// Returns an empty distribution when the total is zero. Rounding is
/// half-to-even; the sum may differ from 100 by up to the label count.
pub fn normalize(acc: &ScoreAccumulator, limits: &NormalizerLimits) -> PercentageDistribution {
    let total = acc.total();
    if total <= 0.0 {
        return PercentageDistribution::empty();
    }

    let mut dist = PercentageDistribution::from_pairs(
        acc.iter()
            .map(|(label, score)| (label, percentage(score, total))),
    );
    cap_dominant(&mut dist, limits);
    dist
}

fn percentage(score: f64, total: f64) -> u32 {
    (100.0 * score / total).round_ties_even().max(0.0) as u32
}

/// Clamp the top label to the cap and hand the freed points to the
/// runner-up. Ties for runner-up go to the label earliest in table order.
pub fn cap_dominant(dist: &mut PercentageDistribution, limits: &NormalizerLimits) {
    let Some((top_label, top_value)) = dist.top().map(|(l, v)| (l.to_string(), v)) else {
        return;
    };
    if top_value <= limits.cap {
        return;
    }
    dist.set(&top_label, limits.cap);

    let runner_up = dist
        .ranked()
        .into_iter()
        .find(|(l, _)| *l != top_label)
        .map(|(l, v)| (l.to_string(), v));

    if let Some((label, value)) = runner_up {
        let headroom = (100i64 - dist.sum() as i64).clamp(0, limits.redistribution_max as i64);
        dist.set(&label, value + headroom as u32);
    }
}
