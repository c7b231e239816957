use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Token to occurrence count, iterating in first-occurrence order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrequencyMap {
    counts: IndexMap<String, u64>,
}

impl FrequencyMap {
    /// Creates an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts every token in `tokens`
    pub fn from_tokens<'a, I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut counts: IndexMap<String, u64> = IndexMap::new();
        for token in tokens {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Count for `token`, zero when absent
    pub fn get(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Entries in first-occurrence order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(token, count)| (token.as_str(), *count))
    }

    /// New map holding only the entries for which `keep` returns true
    pub fn filter_entries<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str, u64) -> bool,
    {
        let counts = self
            .counts
            .iter()
            .filter(|(token, count)| keep(token, **count))
            .map(|(token, count)| (token.clone(), *count))
            .collect();
        Self { counts }
    }
}

impl<S: Into<String>> FromIterator<(S, u64)> for FrequencyMap {
    /// Builds a map from pre-counted pairs; repeated tokens add up
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut counts: IndexMap<String, u64> = IndexMap::new();
        for (token, count) in iter {
            *counts.entry(token.into()).or_insert(0) += count;
        }
        Self { counts }
    }
}
