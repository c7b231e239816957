use jieba_rs::Jieba;

/// Dictionary based word segmenter
///
/// Loading the built-in dictionary takes a noticeable amount of time, so a
/// tokenizer is built once and shared between requests.
pub struct Tokenizer {
    jieba: Jieba,
    hmm: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer {
    /// Creates a tokenizer with the built-in dictionary and HMM enabled for
    /// words the dictionary does not know
    pub fn new() -> Self {
        let started = std::time::Instant::now();
        let jieba = Jieba::new();
        ::log::info!(
            "Loaded segmentation dictionary in {:.2} seconds",
            started.elapsed().as_secs_f64()
        );
        Self { jieba, hmm: true }
    }

    /// Disables or enables HMM discovery of unknown words
    pub fn with_hmm(mut self, hmm: bool) -> Self {
        self.hmm = hmm;
        self
    }

    /// Segments `text` and joins the words with single spaces
    pub fn segment(&self, text: &str) -> String {
        self.jieba
            .cut(text, self.hmm)
            .into_iter()
            .filter(|word| !word.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Splits a segmented string back into tokens
    pub fn tokens(segmented: &str) -> impl Iterator<Item = &str> {
        segmented.split_whitespace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_chinese_without_spaces() {
        let tokenizer = Tokenizer::new();
        let segmented = tokenizer.segment("你好世界你好");
        let tokens: Vec<&str> = Tokenizer::tokens(&segmented).collect();

        assert_eq!(tokens.iter().filter(|t| **t == "你好").count(), 2);
        assert_eq!(tokens.concat(), "你好世界你好");
    }

    #[test]
    fn test_whitespace_never_becomes_a_token() {
        let tokenizer = Tokenizer::new();
        let segmented = tokenizer.segment("  hello \t world\n\n");
        let tokens: Vec<&str> = Tokenizer::tokens(&segmented).collect();

        assert_eq!(tokens, vec!["hello", "world"]);
        assert!(!segmented.contains("  "));
    }

    #[test]
    fn test_empty_input() {
        let tokenizer = Tokenizer::new();
        assert_eq!(tokenizer.segment(""), "");
        assert_eq!(Tokenizer::tokens("").count(), 0);
    }

    #[test]
    fn test_segmentation_is_deterministic() {
        let tokenizer = Tokenizer::new();
        let text = "我们在北京大学学习自然语言处理";
        assert_eq!(tokenizer.segment(text), tokenizer.segment(text));

        let without_hmm = Tokenizer::new().with_hmm(false);
        assert_eq!(without_hmm.segment(text), without_hmm.segment(text));
    }
}
