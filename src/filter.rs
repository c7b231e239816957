use crate::error::{Error, Result};
use crate::frequency::FrequencyMap;
use serde::{Deserialize, Serialize};

pub const MIN_THRESHOLD: u32 = 1;
pub const MAX_THRESHOLD: u32 = 100;
pub const DEFAULT_THRESHOLD: u32 = 10;

/// Length of the ranked table
pub const TOP_N: usize = 20;

/// Minimum count an entry needs to survive filtering, always in `1..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Threshold(u32);

impl Threshold {
    pub fn new(value: u32) -> Result<Self> {
        if (MIN_THRESHOLD..=MAX_THRESHOLD).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidThreshold(value))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(DEFAULT_THRESHOLD)
    }
}

impl TryFrom<u32> for Threshold {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Threshold> for u32 {
    fn from(threshold: Threshold) -> Self {
        threshold.0
    }
}

/// One row of the ranked table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    pub token: String,
    pub count: u64,
}

/// Keeps frequent tokens and ranks them
#[derive(Debug, Clone, Copy)]
pub struct FrequencyFilter {
    threshold: Threshold,
    top_n: usize,
}

impl Default for FrequencyFilter {
    fn default() -> Self {
        Self {
            threshold: Threshold::default(),
            top_n: TOP_N,
        }
    }
}

impl FrequencyFilter {
    /// Create a filter; `top_n` must be in `1..=TOP_N`
    pub fn new(threshold: Threshold, top_n: usize) -> Result<Self> {
        if !(1..=TOP_N).contains(&top_n) {
            return Err(Error::Config(format!(
                "top_n must be between 1 and {}, got {}",
                TOP_N, top_n
            )));
        }
        Ok(Self { threshold, top_n })
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    /// Entries with `count >= threshold`; the rest are dropped, not zeroed
    pub fn filter(&self, map: &FrequencyMap) -> FrequencyMap {
        let threshold = u64::from(self.threshold.get());
        let filtered = map.filter_entries(|_, count| count >= threshold);
        ::log::debug!(
            "Threshold {} kept {} of {} tokens",
            threshold,
            filtered.len(),
            map.len()
        );
        filtered
    }

    /// The `top_n` most frequent entries of `map`, highest count first
    pub fn rank(&self, map: &FrequencyMap) -> Vec<RankedEntry> {
        rank(map, self.top_n)
    }
}

/// Most frequent `n` entries, descending by count
///
/// The sort is stable, so equal counts keep the map's first-occurrence order.
pub fn rank(map: &FrequencyMap, n: usize) -> Vec<RankedEntry> {
    let mut entries: Vec<(&str, u64)> = map.iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));
    entries
        .into_iter()
        .take(n)
        .map(|(token, count)| RankedEntry {
            token: token.to_string(),
            count,
        })
        .collect()
}
