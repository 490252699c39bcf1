//! Where the word list comes from

use std::path::PathBuf;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use super::Corpus;
use crate::error::{MailboxError, Result};

/// The 10,000 most common English words from Google's Trillion Word corpus,
/// filtered to exclude swear words.
pub const DEFAULT_WORD_LIST_URL: &str = "https://raw.githubusercontent.com/first20hours/google-10000-english/refs/heads/master/google-10000-english-usa-no-swears.txt";

/// Trait for word list sources
#[async_trait]
pub trait CorpusSource: Send + Sync {
    /// Load and parse the full word list
    async fn load(&self) -> Result<Corpus>;

    /// Human readable location, used in logs and errors
    fn describe(&self) -> String;
}

/// Fetch the word list over HTTP(S)
pub struct HttpSource {
    url: String,
    client: Client,
    timeout: Duration,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("mailbox/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create HTTP client: {}. Using default.", e);
                Client::new()
            });

        Self {
            url: url.into(),
            client,
            timeout,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch_text(&self) -> Result<String> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            if e.is_timeout() {
                MailboxError::timeout("word list download", self.timeout.as_secs())
            } else {
                MailboxError::from(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MailboxError::network(
                format!("server responded with {}", status),
                Some(status.as_u16()),
                Some(self.url.clone()),
            ));
        }

        Ok(response.text().await?)
    }
}

impl Default for HttpSource {
    fn default() -> Self {
        Self::new(DEFAULT_WORD_LIST_URL, Duration::from_secs(30))
    }
}

#[async_trait]
impl CorpusSource for HttpSource {
    async fn load(&self) -> Result<Corpus> {
        let start = Instant::now();
        let text = self.fetch_text().await.map_err(|e| match e {
            MailboxError::Timeout { .. } => e,
            other => MailboxError::corpus_load(self.describe(), other.to_string()),
        })?;
        let corpus = Corpus::parse(&text);

        tracing::info!(
            url = %self.url,
            words = %corpus.len(),
            duration_ms = %start.elapsed().as_millis(),
            "Word list downloaded"
        );

        Ok(corpus)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Read the word list from a local file
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CorpusSource for FileSource {
    async fn load(&self) -> Result<Corpus> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            MailboxError::io(e.to_string(), Some(self.path.to_string_lossy().to_string()))
        })?;
        let corpus = Corpus::parse(&text);

        tracing::info!(
            path = %self.path.display(),
            words = %corpus.len(),
            "Word list read from file"
        );

        Ok(corpus)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
