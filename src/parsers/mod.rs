pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::config::CleanerConfig;

/// Turns fetched page text into plain text with no markup or punctuation
#[derive(Debug, Clone, Copy, Default)]
pub struct Cleaner {
    config: CleanerConfig,
}

impl Cleaner {
    /// Creates a cleaner with the given options
    pub fn new(config: CleanerConfig) -> Self {
        Self { config }
    }

    /// Runs every cleaning stage over `raw`
    ///
    /// Each stage yields a new string; the input is never modified. Running
    /// the cleaner on its own output returns the same text.
    pub fn clean(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }

        let without_blocks = if self.config.drop_script_and_style {
            html::strip_script_and_style(raw)
        } else {
            raw.to_string()
        };
        let without_tags = html::strip_tags(&without_blocks);
        let cleaned = text::strip_punctuation(&without_tags);

        ::log::debug!(
            "Cleaner reduced {} bytes to {} bytes",
            raw.len(),
            cleaned.len()
        );
        cleaned
    }
}
