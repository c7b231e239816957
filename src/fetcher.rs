use crate::config::FetchConfig;
use crate::error::{FETCH_FAILED_MESSAGE, FetchError};
use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use std::time::Duration;
use url::Url;

/// Raw page bytes and the encoding detected for them
#[derive(Debug, Clone)]
pub struct Document {
    /// URL after redirects
    pub url: String,
    pub bytes: Vec<u8>,
    pub encoding: &'static Encoding,
}

impl Document {
    /// Builds a document, detecting the encoding of `bytes`
    pub fn new(url: String, bytes: Vec<u8>) -> Self {
        let tld = Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(top_level_domain));
        let encoding = detect_encoding(&bytes, tld.as_deref());
        Self {
            url,
            bytes,
            encoding,
        }
    }

    /// Decodes the bytes, replacing malformed sequences with U+FFFD
    pub fn decode(&self) -> String {
        let (text, used, had_errors) = self.encoding.decode(&self.bytes);
        if had_errors {
            ::log::warn!(
                "{} contained bytes that are not valid {}; replaced them",
                self.url,
                used.name()
            );
        }
        text.into_owned()
    }
}

/// Text ready for the analysis pipeline
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub url: String,
    pub text: String,
    /// Detected encoding, `None` when the text is the fixed error message
    pub encoding: Option<&'static str>,
}

/// Statistical encoding detection
///
/// A byte-order mark wins outright. Empty input is treated as UTF-8.
/// `tld` is a lowercase top-level domain used as a hint.
pub fn detect_encoding(bytes: &[u8], tld: Option<&str>) -> &'static Encoding {
    if bytes.is_empty() {
        return UTF_8;
    }
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return encoding;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let tld = tld.filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_lowercase()));
    let encoding = detector.guess(tld.map(str::as_bytes), true);
    ::log::debug!("Detected encoding {} for {} bytes", encoding.name(), bytes.len());
    encoding
}

/// Last label of a host name, lowercased
fn top_level_domain(host: &str) -> String {
    host.rsplit('.').next().unwrap_or_default().to_ascii_lowercase()
}

/// Retrieves pages over HTTP
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: reqwest::Client,
    placeholder_on_http_error: bool,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            client,
            placeholder_on_http_error: config.placeholder_on_http_error,
        })
    }

    /// Downloads `url` and detects its encoding
    ///
    /// A non-success status is an error; so are timeouts and connection
    /// failures.
    pub async fn fetch(&self, url: &str) -> Result<Document, FetchError> {
        let parsed = Url::parse(url.trim())?;
        ::log::info!("Fetching {}", parsed);

        let started = std::time::Instant::now();
        let response = self.client.get(parsed.clone()).send().await?;
        let status = response.status();

        if !status.is_success() {
            ::log::warn!("{} returned HTTP {}", parsed, status);
            return Err(FetchError::Status {
                url: parsed.to_string(),
                status,
            });
        }

        let final_url = response.url().to_string();
        let bytes = response.bytes().await?.to_vec();
        ::log::debug!(
            "Fetched {} bytes from {} in {:.2} seconds",
            bytes.len(),
            final_url,
            started.elapsed().as_secs_f64()
        );

        Ok(Document::new(final_url, bytes))
    }

    /// Downloads and decodes `url`
    ///
    /// When `placeholder_on_http_error` is set, a non-success status yields
    /// the fixed error message as the page text instead of an error.
    pub async fn fetch_text(&self, url: &str) -> Result<FetchedPage, FetchError> {
        match self.fetch(url).await {
            Ok(document) => Ok(FetchedPage {
                text: document.decode(),
                encoding: Some(document.encoding.name()),
                url: document.url,
            }),
            Err(FetchError::Status { url, .. }) if self.placeholder_on_http_error => {
                Ok(FetchedPage {
                    url,
                    text: FETCH_FAILED_MESSAGE.to_string(),
                    encoding: None,
                })
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode, routing::get};
    use encoding_rs::GBK;

    const ARTICLE: &str = "自然语言处理是计算机科学领域与人工智能领域中的一个重要方向。\
        它研究能实现人与计算机之间用自然语言进行有效通信的各种理论和方法。\
        自然语言处理是一门融语言学、计算机科学、数学于一体的科学。";

    fn gbk_bytes(text: &str) -> Vec<u8> {
        let (bytes, _, had_errors) = GBK.encode(text);
        assert!(!had_errors);
        bytes.into_owned()
    }

    /// Serves a few fixed pages on an ephemeral port
    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/utf8", get(|| async { format!("<p>{}</p>", ARTICLE) }))
            .route("/gbk", get(|| async { gbk_bytes(ARTICLE) }))
            .route("/empty", get(|| async { "" }))
            .route(
                "/missing",
                get(|| async { (StatusCode::NOT_FOUND, "not here") }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn fetcher(placeholder_on_http_error: bool) -> Fetcher {
        Fetcher::new(&FetchConfig {
            timeout_secs: 5,
            placeholder_on_http_error,
            ..FetchConfig::default()
        })
        .unwrap()
    }

    #[test]
    fn test_detect_utf8() {
        let encoding = detect_encoding(ARTICLE.as_bytes(), None);
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn test_detect_gbk_round_trips() {
        let bytes = gbk_bytes(ARTICLE);
        let document = Document::new("http://example.cn/a".to_string(), bytes);
        assert_eq!(document.decode(), ARTICLE);
    }

    #[test]
    fn test_bom_wins() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("abc".as_bytes());
        assert_eq!(detect_encoding(&bytes, Some("jp")), UTF_8);
    }

    #[test]
    fn test_empty_bytes_decode_to_empty_text() {
        let document = Document::new("http://example.com".to_string(), Vec::new());
        assert_eq!(document.encoding, UTF_8);
        assert_eq!(document.decode(), "");
    }

    #[test]
    fn test_invalid_bytes_are_replaced_not_fatal() {
        let document = Document {
            url: "http://example.com".to_string(),
            bytes: vec![b'a', 0xFF, b'b'],
            encoding: UTF_8,
        };
        assert_eq!(document.decode(), "a\u{FFFD}b");
    }

    #[test]
    fn test_top_level_domain() {
        assert_eq!(top_level_domain("news.Example.CN"), "cn");
        assert_eq!(top_level_domain("localhost"), "localhost");
    }

    #[tokio::test]
    async fn test_fetch_utf8_page() {
        let base = spawn_server().await;
        let page = fetcher(false)
            .fetch_text(&format!("{}/utf8", base))
            .await
            .unwrap();
        assert_eq!(page.text, format!("<p>{}</p>", ARTICLE));
        assert_eq!(page.encoding, Some("UTF-8"));
    }

    #[tokio::test]
    async fn test_fetch_gbk_page() {
        let base = spawn_server().await;
        let page = fetcher(false)
            .fetch_text(&format!("{}/gbk", base))
            .await
            .unwrap();
        assert_eq!(page.text, ARTICLE);
    }

    #[tokio::test]
    async fn test_fetch_empty_page() {
        let base = spawn_server().await;
        let page = fetcher(false)
            .fetch_text(&format!("{}/empty", base))
            .await
            .unwrap();
        assert_eq!(page.text, "");
    }

    #[tokio::test]
    async fn test_not_found_is_an_error() {
        let base = spawn_server().await;
        let err = fetcher(false)
            .fetch_text(&format!("{}/missing", base))
            .await
            .unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, StatusCode::NOT_FOUND),
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_not_found_yields_placeholder_in_legacy_mode() {
        let base = spawn_server().await;
        let page = fetcher(true)
            .fetch_text(&format!("{}/missing", base))
            .await
            .unwrap();
        assert_eq!(page.text, FETCH_FAILED_MESSAGE);
        assert_eq!(page.encoding, None);
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = fetcher(true)
            .fetch_text(&format!("http://{}/", addr))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }

    #[tokio::test]
    async fn test_invalid_url() {
        let err = fetcher(false).fetch_text("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }
}
