// Score accumulation and the finished percentage distribution.
//
// A ScoreAccumulator starts with every label of a category table at zero and
// only ever grows by non-negative additions. The key set is fixed at
// construction. Normalization turns it into an immutable
// PercentageDistribution.

use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

/// Raw per-label scores for one request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreAccumulator {
    labels: Vec<String>,
    scores: Vec<f64>,
}

impl ScoreAccumulator {
    /// Every label at zero, in table order.
    pub fn new(labels: &[String]) -> Self {
        Self {
            labels: labels.to_vec(),
            scores: vec![0.0; labels.len()],
        }
    }

    /// Add a non-negative contribution. Unknown labels and negative or
    /// non-finite amounts are ignored.
    pub fn add(&mut self, label: &str, amount: f64) {
        if !(amount.is_finite() && amount >= 0.0) {
            debug!(label, amount, "Ignoring invalid score contribution");
            return;
        }
        match self.labels.iter().position(|l| l == label) {
            Some(i) => self.scores[i] += amount,
            None => debug!(label, "Ignoring score for unknown label"),
        }
    }

    /// Raise `label` to at least `target`.
    pub fn raise_to(&mut self, label: &str, target: f64) {
        let current = self.get(label);
        if target > current {
            self.add(label, target - current);
        }
    }

    pub fn get(&self, label: &str) -> f64 {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.scores[i])
            .unwrap_or(0.0)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    pub fn total(&self) -> f64 {
        self.scores.iter().sum()
    }

    /// Highest score among all labels other than `label`.
    pub fn max_excluding(&self, label: &str) -> f64 {
        self.iter()
            .filter(|(l, _)| *l != label)
            .map(|(_, s)| s)
            .fold(0.0, f64::max)
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// (label, score) pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.scores.iter().copied())
    }
}

/// Label → integer percentage, in table order.
///
/// Either empty (nothing scored) or summing to 100 within rounding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PercentageDistribution {
    entries: Vec<(String, u32)>,
}

impl PercentageDistribution {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, u32)>,
        S: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(l, v)| (l.into(), v)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| *v)
    }

    pub fn sum(&self) -> u32 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// (label, percentage) pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }

    /// Labels by descending percentage. Ties keep table order.
    pub fn ranked(&self) -> Vec<(&str, u32)> {
        let mut ranked: Vec<(&str, u32)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }

    /// The highest-scoring label, first in table order among ties.
    pub fn top(&self) -> Option<(&str, u32)> {
        self.ranked().into_iter().next()
    }

    /// Re-open as an accumulator over the same labels, for post-processing
    /// that must be normalized again.
    pub fn to_accumulator(&self) -> ScoreAccumulator {
        let labels: Vec<String> = self.entries.iter().map(|(l, _)| l.clone()).collect();
        let mut acc = ScoreAccumulator::new(&labels);
        for (label, value) in self.iter() {
            acc.add(label, value as f64);
        }
        acc
    }

    pub(crate) fn set(&mut self, label: &str, value: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|(l, _)| l == label) {
            entry.1 = value;
        }
    }
}

// Serialized as a JSON object keyed by label, keeping table order.
impl Serialize for PercentageDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, value) in &self.entries {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}
