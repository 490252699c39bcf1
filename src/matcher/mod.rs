//! Word matching module
//!
//! Turns a letter, position flags and a match mode into a [`Matcher`],
//! filters the corpus with it and samples the result.

pub mod predicate;

pub use predicate::Matcher;

use std::time::Instant;

use chrono::Utc;

use crate::corpus::Corpus;
use crate::error::{MailboxError, Result};
use crate::sample::Sampler;
use crate::types::{Letter, QueryConfig, QueryResult};

/// Runs queries against a shared corpus
#[derive(Debug, Clone)]
pub struct WordMatcher {
    corpus: Corpus,
}

impl WordMatcher {
    pub fn new(corpus: Corpus) -> Self {
        Self { corpus }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Every corpus word the matcher accepts, in corpus order
    pub fn find_matches(&self, matcher: &Matcher) -> Vec<&str> {
        if matcher.is_nothing() {
            return Vec::new();
        }

        self.corpus
            .iter()
            .filter(|word| matcher.is_match(word))
            .map(String::as_str)
            .collect()
    }

    /// Run a query and sample up to `config.count` matching words.
    ///
    /// An empty match set is an empty result, not an error.
    pub fn query(&self, config: &QueryConfig, sampler: &mut Sampler) -> Result<QueryResult> {
        config.validate()?;

        let start = Instant::now();
        let matcher = Matcher::derive(config.letter, config.positions, config.mode);
        let matches = self.find_matches(&matcher);
        let words: Vec<String> = sampler
            .sample(&matches, config.count)
            .into_iter()
            .map(|w| w.to_string())
            .collect();

        tracing::debug!(
            letter = ?config.letter,
            positions = %config.positions,
            mode = %config.mode,
            matcher = %matcher,
            total_matches = %matches.len(),
            sampled = %words.len(),
            duration_us = %start.elapsed().as_micros(),
            "Query completed"
        );

        Ok(QueryResult {
            letter: config.letter,
            positions: config.positions,
            mode: config.mode,
            words,
            total_matches: matches.len(),
            generated_at: Utc::now(),
        })
    }

    /// Query from raw letter input.
    ///
    /// Invalid letters and out-of-range counts are logged and recovered as an
    /// empty result so an interactive loop never stops on bad input.
    pub fn query_input(&self, letter_input: &str, config: &QueryConfig, sampler: &mut Sampler) -> QueryResult {
        let letter = if letter_input.trim().is_empty() {
            None
        } else {
            match Letter::parse(letter_input) {
                Ok(letter) => Some(letter),
                Err(e) => return self.recover(config, e),
            }
        };

        let config = QueryConfig {
            letter,
            ..config.clone()
        };

        match self.query(&config, sampler) {
            Ok(result) => result,
            Err(e) => self.recover(&config, e),
        }
    }

    fn recover(&self, config: &QueryConfig, error: MailboxError) -> QueryResult {
        tracing::warn!(error = %error, "Query rejected, returning no words");
        QueryResult::empty(config)
    }
}
