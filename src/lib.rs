pub mod charts;
pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod frequency;
pub mod parsers;
pub mod results;
pub mod server;
pub mod tokenizer;

pub use error::{Error, FetchError, Result};
pub use filter::{FrequencyFilter, RankedEntry, Threshold};
pub use frequency::FrequencyMap;
pub use results::{Analysis, PageReport};

use config::AppConfig;
use fetcher::{FetchedPage, Fetcher};
use parsers::Cleaner;
use std::sync::Arc;
use tokenizer::Tokenizer;

/// The pure text pipeline: clean, segment, count, filter, rank
pub struct Analyzer {
    cleaner: Cleaner,
    tokenizer: Tokenizer,
}

impl Analyzer {
    pub fn new(cleaner: Cleaner, tokenizer: Tokenizer) -> Self {
        Self { cleaner, tokenizer }
    }

    /// Analyzer configured from `config`, loading the segmentation dictionary
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(Cleaner::new(config.cleaner), Tokenizer::new())
    }

    /// Counts every token of `raw` after cleaning and segmentation
    pub fn count(&self, raw: &str) -> FrequencyMap {
        let cleaned = self.cleaner.clean(raw);
        let segmented = self.tokenizer.segment(&cleaned);
        FrequencyMap::from_tokens(Tokenizer::tokens(&segmented))
    }

    /// Runs the whole pipeline over `raw`
    ///
    /// Empty input produces an empty analysis.
    pub fn analyze(&self, raw: &str, filter: &FrequencyFilter) -> Analysis {
        if raw.trim().is_empty() {
            return Analysis::empty(filter.threshold());
        }

        let frequencies = self.count(raw);
        let filtered = filter.filter(&frequencies);
        let ranked = filter.rank(&filtered);

        ::log::debug!(
            "Analyzed {} tokens ({} distinct), {} above threshold",
            frequencies.total(),
            frequencies.len(),
            filtered.len()
        );

        Analysis {
            threshold: filter.threshold(),
            total_tokens: frequencies.total(),
            distinct_tokens: frequencies.len(),
            filtered,
            ranked,
        }
    }
}

/// Fetches `url` and analyses its text
///
/// The report carries the URL the page was finally served from, after
/// redirects. A blank URL is the initial state of the page and yields an empty report
/// without any network access.
pub async fn analyze_url(
    fetcher: &Fetcher,
    analyzer: Arc<Analyzer>,
    url: &str,
    filter: FrequencyFilter,
) -> Result<PageReport> {
    let url = url.trim();
    if url.is_empty() {
        return Ok(PageReport::new(
            String::new(),
            None,
            None,
            Analysis::empty(filter.threshold()),
        ));
    }

    let FetchedPage {
        url: final_url,
        text,
        encoding,
    } = fetcher.fetch_text(url).await?;

    let (title, analysis) = tokio::task::spawn_blocking(move || {
        let title = parsers::html::extract_title(&text);
        let analysis = analyzer.analyze(&text, &filter);
        (title, analysis)
    })
    .await?;

    ::log::info!(
        "{}: {} tokens, {} ranked",
        final_url,
        analysis.total_tokens,
        analysis.ranked.len()
    );

    Ok(PageReport::new(
        final_url,
        title,
        encoding.map(str::to_string),
        analysis,
    ))
}
