//! Mailbox - find letters within words
//!
//! A small teaching tool: pick a letter and where it should appear in a word
//! (beginning, middle, end), and get a random handful of common English words
//! that fit, with the letter highlighted.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod error;
pub mod highlight;
pub mod matcher;
pub mod sample;
pub mod session;
pub mod types;

// Re-export commonly used types
pub use error::{MailboxError, Result};
pub use types::{
    Letter, MatchMode, Position, PositionFlags, QueryConfig, QueryResult, DEFAULT_COUNT,
    MAX_COUNT, MIN_COUNT,
};

// Re-export main functionality
pub use config::AppConfig;
pub use corpus::{Corpus, CorpusCache, CorpusSource};
pub use highlight::{Color, Highlighter, MarkupStyle};
pub use matcher::{Matcher, WordMatcher};
pub use sample::Sampler;
pub use session::Session;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
