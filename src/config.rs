//! Application configuration from the environment

use std::path::PathBuf;
use std::time::Duration;

use crate::config_error;
use crate::corpus::{CorpusSource, FileSource, HttpSource, DEFAULT_WORD_LIST_URL};
use crate::error::Result;
use crate::highlight::MarkupStyle;
use crate::types::{validate_count, DEFAULT_COUNT};

pub const ENV_WORD_LIST_URL: &str = "MAILBOX_WORD_LIST_URL";
pub const ENV_WORD_LIST_PATH: &str = "MAILBOX_WORD_LIST_PATH";
pub const ENV_COUNT: &str = "MAILBOX_COUNT";
pub const ENV_SEED: &str = "MAILBOX_SEED";
pub const ENV_TIMEOUT_SECS: &str = "MAILBOX_TIMEOUT_SECS";
pub const ENV_MARKUP: &str = "MAILBOX_MARKUP";

/// Runtime settings; command-line flags are applied on top
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub word_list_url: String,
    /// Local word list, preferred over the URL when set
    pub word_list_path: Option<PathBuf>,
    pub count: usize,
    pub seed: Option<u64>,
    pub timeout: Duration,
    pub markup: MarkupStyle,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            word_list_url: DEFAULT_WORD_LIST_URL.to_string(),
            word_list_path: None,
            count: DEFAULT_COUNT,
            seed: None,
            timeout: Duration::from_secs(30),
            markup: MarkupStyle::Html,
        }
    }
}

impl AppConfig {
    /// Read `MAILBOX_*` variables from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup; unset or blank keys keep defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_WORD_LIST_URL) {
            config.word_list_url = url;
        }

        if let Some(path) = get(ENV_WORD_LIST_PATH) {
            config.word_list_path = Some(PathBuf::from(path));
        }

        if let Some(count) = get(ENV_COUNT) {
            let count: usize = count
                .parse()
                .map_err(|_| config_error!("{} must be a number, got '{}'", ENV_COUNT, count))?;
            validate_count(count).map_err(|e| config_error!("{}: {}", ENV_COUNT, e))?;
            config.count = count;
        }

        if let Some(seed) = get(ENV_SEED) {
            config.seed = Some(
                seed.parse()
                    .map_err(|_| config_error!("{} must be an unsigned integer, got '{}'", ENV_SEED, seed))?,
            );
        }

        if let Some(secs) = get(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|_| config_error!("{} must be a number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs))?;
            if secs == 0 {
                return Err(config_error!("{} must be greater than zero", ENV_TIMEOUT_SECS));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(markup) = get(ENV_MARKUP) {
            config.markup = MarkupStyle::parse(&markup)?;
        }

        Ok(config)
    }

    /// The word list source these settings point at
    pub fn corpus_source(&self) -> Box<dyn CorpusSource> {
        match &self.word_list_path {
            Some(path) => Box::new(FileSource::new(path.clone())),
            None => Box::new(HttpSource::new(self.word_list_url.clone(), self.timeout)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.corpus_source().describe(), DEFAULT_WORD_LIST_URL);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (ENV_WORD_LIST_PATH, "/tmp/words.txt"),
            (ENV_COUNT, "8"),
            (ENV_SEED, "1234"),
            (ENV_TIMEOUT_SECS, "5"),
            (ENV_MARKUP, "markdown"),
        ]))
        .unwrap();

        assert_eq!(config.word_list_path, Some(PathBuf::from("/tmp/words.txt")));
        assert_eq!(config.count, 8);
        assert_eq!(config.seed, Some(1234));
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.markup, MarkupStyle::Markdown);
        assert_eq!(config.corpus_source().describe(), "/tmp/words.txt");
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = AppConfig::from_lookup(lookup(&[(ENV_COUNT, "  "), (ENV_SEED, "")])).unwrap();
        assert_eq!(config.count, DEFAULT_COUNT);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_invalid_values() {
        for pairs in [
            [(ENV_COUNT, "eleven")],
            [(ENV_COUNT, "11")],
            [(ENV_SEED, "-1")],
            [(ENV_TIMEOUT_SECS, "0")],
            [(ENV_MARKUP, "ansi")],
        ] {
            let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, crate::error::MailboxError::Config { .. }));
        }
    }
}
