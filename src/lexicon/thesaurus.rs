// WordNet-style synset thesaurus loaded from JSON.
//
// Each synset groups lemmas that share a sense and points at its hypernyms
// (more general synsets). Similarity between two words is WordNet path
// similarity: 1 / (shortest hypernym path between any of their senses + 1),
// compared only within one part of speech. Words in the same synset score 1.0.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use super::traits::{Definition, LexicalDatabase};

/// The lexicon bundled with the binary.
const BUILTIN_LEXICON: &str = include_str!("../../data/lexicon.json");

/// On-disk synset record.
#[derive(Debug, Deserialize)]
struct SynsetRecord {
    id: String,
    pos: String,
    lemmas: Vec<String>,
    #[serde(default)]
    hypernyms: Vec<String>,
    #[serde(default)]
    gloss: String,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    synsets: Vec<SynsetRecord>,
}

#[derive(Debug)]
struct Synset {
    pos: String,
    lemmas: Vec<String>,
    /// Indices into `Thesaurus::synsets`
    hypernyms: Vec<usize>,
    gloss: String,
}

/// In-memory synset graph.
#[derive(Debug)]
pub struct Thesaurus {
    synsets: Vec<Synset>,
    /// Lower-cased lemma → synset indices, in file order
    senses: HashMap<String, Vec<usize>>,
}

impl Thesaurus {
    /// The built-in lexicon.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_LEXICON).context("Built-in lexicon is malformed")
    }

    /// Load a lexicon file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Failed to parse lexicon {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let file: LexiconFile = serde_json::from_str(raw).context("Invalid lexicon JSON")?;

        let mut ids: HashMap<String, usize> = HashMap::new();
        for (i, record) in file.synsets.iter().enumerate() {
            if ids.insert(record.id.clone(), i).is_some() {
                anyhow::bail!("Duplicate synset id {}", record.id);
            }
        }

        let mut synsets = Vec::with_capacity(file.synsets.len());
        let mut senses: HashMap<String, Vec<usize>> = HashMap::new();

        for (i, record) in file.synsets.into_iter().enumerate() {
            let hypernyms = record
                .hypernyms
                .iter()
                .map(|h| {
                    ids.get(h)
                        .copied()
                        .with_context(|| format!("Synset {} has unknown hypernym {}", record.id, h))
                })
                .collect::<Result<Vec<_>>>()?;

            let lemmas: Vec<String> = record.lemmas.iter().map(|l| normalize(l)).collect();
            for lemma in &lemmas {
                senses.entry(lemma.clone()).or_default().push(i);
            }

            synsets.push(Synset {
                pos: record.pos,
                lemmas,
                hypernyms,
                gloss: record.gloss,
            });
        }

        debug!(synsets = synsets.len(), lemmas = senses.len(), "Loaded lexicon");

        Ok(Self { synsets, senses })
    }

    pub fn synset_count(&self) -> usize {
        self.synsets.len()
    }

    fn senses_of(&self, word: &str) -> &[usize] {
        self.senses
            .get(&normalize(word))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every ancestor of `start` (itself included) with its shortest distance.
    fn ancestors(&self, start: usize) -> HashMap<usize, usize> {
        let mut dist = HashMap::new();
        let mut queue = VecDeque::new();
        dist.insert(start, 0);
        queue.push_back(start);
        while let Some(node) = queue.pop_front() {
            let d = dist[&node];
            for &parent in &self.synsets[node].hypernyms {
                if !dist.contains_key(&parent) {
                    dist.insert(parent, d + 1);
                    queue.push_back(parent);
                }
            }
        }
        dist
    }

    /// Shortest path between two synsets through a common ancestor.
    fn path_distance(&self, a: usize, b: usize) -> Option<usize> {
        if a == b {
            return Some(0);
        }
        let up_a = self.ancestors(a);
        let up_b = self.ancestors(b);
        up_a.iter()
            .filter_map(|(node, da)| up_b.get(node).map(|db| da + db))
            .min()
    }
}

impl LexicalDatabase for Thesaurus {
    fn synonyms(&self, word: &str) -> Result<Vec<String>> {
        let word = normalize(word);
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for &s in self.senses_of(&word) {
            for lemma in &self.synsets[s].lemmas {
                if *lemma != word && seen.insert(lemma.clone()) {
                    out.push(lemma.clone());
                }
            }
        }
        Ok(out)
    }

    fn similarity(&self, a: &str, b: &str) -> Result<Option<f64>> {
        let mut best: Option<f64> = None;
        for &sa in self.senses_of(a) {
            for &sb in self.senses_of(b) {
                if self.synsets[sa].pos != self.synsets[sb].pos {
                    continue;
                }
                if let Some(d) = self.path_distance(sa, sb) {
                    let sim = 1.0 / (d as f64 + 1.0);
                    if best.is_none_or(|b| sim > b) {
                        best = Some(sim);
                    }
                }
            }
        }
        Ok(best)
    }

    fn definitions(&self, word: &str) -> Result<Vec<Definition>> {
        Ok(self
            .senses_of(word)
            .iter()
            .map(|&s| Definition {
                pos: self.synsets[s].pos.clone(),
                gloss: self.synsets[s].gloss.clone(),
            })
            .collect())
    }
}

/// Lemmas are matched lower-case; multi-word lemmas use spaces.
fn normalize(word: &str) -> String {
    word.trim().to_lowercase().replace('_', " ")
}
