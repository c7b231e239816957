use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration for fetching pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Feed the fixed error message through the pipeline instead of
    /// reporting a non-success status as an error
    #[serde(default)]
    pub placeholder_on_http_error: bool,
}

/// Configuration for text cleaning
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Drop `<script>` and `<style>` blocks together with their contents;
    /// off by default, so their text is counted like any other text
    #[serde(default)]
    pub drop_script_and_style: bool,
}

/// Configuration for the web page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Threshold used when the request does not carry one
    #[serde(default = "default_threshold")]
    pub default_threshold: u32,

    /// Number of entries in the ranked table
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub cleaner: CleanerConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `WORDFREQ_BIND` and `WORDFREQ_TIMEOUT_SECS` if they are set
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Ok(bind) = std::env::var("WORDFREQ_BIND") {
            if !bind.is_empty() {
                self.server.bind_addr = bind;
            }
        }

        if let Ok(timeout) = std::env::var("WORDFREQ_TIMEOUT_SECS") {
            self.fetch.timeout_secs = timeout
                .parse()
                .map_err(|_| Error::Config(format!("invalid WORDFREQ_TIMEOUT_SECS: {}", timeout)))?;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if !(crate::filter::MIN_THRESHOLD..=crate::filter::MAX_THRESHOLD)
            .contains(&self.server.default_threshold)
        {
            return Err(Error::InvalidThreshold(self.server.default_threshold));
        }
        if !(1..=crate::filter::TOP_N).contains(&self.server.top_n) {
            return Err(Error::Config(format!(
                "top_n must be between 1 and {}, got {}",
                crate::filter::TOP_N,
                self.server.top_n
            )));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            placeholder_on_http_error: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            default_threshold: default_threshold(),
            top_n: default_top_n(),
        }
    }
}

/// Default request timeout
fn default_timeout_secs() -> u64 {
    30
}

/// Default user agent
fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

/// Default bind address for the web page
fn default_bind_addr() -> String {
    "127.0.0.1:8501".to_string()
}

/// Default frequency threshold
fn default_threshold() -> u32 {
    crate::filter::DEFAULT_THRESHOLD
}

/// Default ranked table length
fn default_top_n() -> usize {
    crate::filter::TOP_N
}
