use thiserror::Error;

/// Fixed user-facing message shown when a page cannot be retrieved
pub const FETCH_FAILED_MESSAGE: &str =
    "无法获取内容，URL可能不正确或服务器返回了错误状态码。";

/// Errors raised while retrieving a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// Timeout, DNS failure, refused connection and similar
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The URL could not be parsed
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl FetchError {
    /// Message suitable for showing to the person who typed the URL
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Status { .. } => FETCH_FAILED_MESSAGE.to_string(),
            FetchError::Transport(e) if e.is_timeout() => {
                format!("{} (请求超时)", FETCH_FAILED_MESSAGE)
            }
            FetchError::Transport(_) => {
                format!("{} (网络连接失败)", FETCH_FAILED_MESSAGE)
            }
            FetchError::InvalidUrl(e) => format!("URL 格式不正确: {}", e),
        }
    }
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("threshold must be between 1 and 100, got {0}")]
    InvalidThreshold(u32),

    #[error("unknown chart type: {0}")]
    UnknownChart(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("analysis task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Message suitable for showing in the page banner
    pub fn user_message(&self) -> String {
        match self {
            Error::Fetch(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
