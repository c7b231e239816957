use crate::filter::{RankedEntry, Threshold};
use crate::frequency::FrequencyMap;
use serde::{Deserialize, Serialize};

/// Word statistics for one piece of text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    /// Threshold the filtered map was built with
    pub threshold: Threshold,

    /// Number of tokens produced by segmentation
    pub total_tokens: u64,

    /// Number of distinct tokens before filtering
    pub distinct_tokens: usize,

    /// Entries whose count reached the threshold
    pub filtered: FrequencyMap,

    /// Most frequent entries of `filtered`
    pub ranked: Vec<RankedEntry>,
}

impl Analysis {
    /// Result for blank input
    pub fn empty(threshold: Threshold) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }
}

/// Report for one analysed URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageReport {
    /// URL of the page (after redirects)
    pub url: String,

    /// Title of the page (if available)
    pub title: Option<String>,

    /// Encoding the page was decoded with
    pub encoding: Option<String>,

    #[serde(flatten)]
    pub analysis: Analysis,
}

impl PageReport {
    /// Create a new report
    pub fn new(
        url: String,
        title: Option<String>,
        encoding: Option<String>,
        analysis: Analysis,
    ) -> Self {
        Self {
            url,
            title,
            encoding,
            analysis,
        }
    }
}
