//! Core types and structures for mailbox

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MailboxError, Result};

/// Smallest number of words a query may ask for
pub const MIN_COUNT: usize = 1;

/// Largest number of words a query may ask for
pub const MAX_COUNT: usize = 10;

/// Default number of words per query
pub const DEFAULT_COUNT: usize = 5;

/// A single ASCII letter, stored lowercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Letter(char);

impl Letter {
    /// Parse user input into a letter.
    ///
    /// Surrounding whitespace is ignored; anything other than exactly one
    /// ASCII alphabetic character is rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let single_letter = Regex::new(r"^[A-Za-z]$")
            .map_err(|e| MailboxError::internal(e.to_string()))?;

        if !single_letter.is_match(trimmed) {
            return Err(MailboxError::invalid_letter(input));
        }

        trimmed
            .chars()
            .next()
            .map(|c| Self(c.to_ascii_lowercase()))
            .ok_or_else(|| MailboxError::invalid_letter(input))
    }

    /// Build from a char, rejecting anything that is not ASCII alphabetic
    pub fn from_char(c: char) -> Result<Self> {
        if c.is_ascii_alphabetic() {
            Ok(Self(c.to_ascii_lowercase()))
        } else {
            Err(MailboxError::invalid_letter(c.to_string()))
        }
    }

    /// Lowercase form used for matching and markup
    pub fn as_char(&self) -> char {
        self.0
    }

    pub fn to_uppercase(&self) -> char {
        self.0.to_ascii_uppercase()
    }

    /// Case-insensitive comparison against a character of a word
    pub fn matches(&self, c: char) -> bool {
        c.eq_ignore_ascii_case(&self.0)
    }

    /// All 26 letters in alphabetical order
    pub fn alphabet() -> Vec<Letter> {
        ('a'..='z').map(Letter).collect()
    }
}

impl std::fmt::Display for Letter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uppercase())
    }
}

impl std::str::FromStr for Letter {
    type Err = MailboxError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Letter {
    type Error = MailboxError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Letter> for String {
    fn from(letter: Letter) -> Self {
        letter.to_string()
    }
}

/// Where in a word the letter may appear
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    /// First character
    Beginning,
    /// Any character strictly between the first and the last
    Middle,
    /// Last character
    End,
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Beginning, Position::Middle, Position::End];

    /// Accepts full names and single-letter abbreviations
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "b" | "beginning" | "begin" | "start" => Ok(Position::Beginning),
            "m" | "middle" | "mid" => Ok(Position::Middle),
            "e" | "end" => Ok(Position::End),
            other => Err(MailboxError::invalid_query(format!(
                "unknown position '{}': expected beginning, middle or end",
                other
            ))),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Position::Beginning => write!(f, "beginning"),
            Position::Middle => write!(f, "middle"),
            Position::End => write!(f, "end"),
        }
    }
}

/// Which positions are eligible for the letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionFlags {
    pub beginning: bool,
    pub middle: bool,
    pub end: bool,
}

impl PositionFlags {
    pub fn new(beginning: bool, middle: bool, end: bool) -> Self {
        Self {
            beginning,
            middle,
            end,
        }
    }

    /// No position enabled
    pub fn none() -> Self {
        Self::new(false, false, false)
    }

    /// Only the given position enabled
    pub fn only(position: Position) -> Self {
        Self::from_positions(&[position])
    }

    pub fn from_positions(positions: &[Position]) -> Self {
        let mut flags = Self::none();
        for position in positions {
            flags.set(*position, true);
        }
        flags
    }

    /// Parse a comma separated list such as `b,e` or `beginning,middle`
    pub fn parse_list(input: &str) -> Result<Self> {
        let positions = input
            .split(',')
            .filter(|part| !part.trim().is_empty())
            .map(Position::parse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_positions(&positions))
    }

    pub fn is_enabled(&self, position: Position) -> bool {
        match position {
            Position::Beginning => self.beginning,
            Position::Middle => self.middle,
            Position::End => self.end,
        }
    }

    pub fn set(&mut self, position: Position, enabled: bool) {
        match position {
            Position::Beginning => self.beginning = enabled,
            Position::Middle => self.middle = enabled,
            Position::End => self.end = enabled,
        }
    }

    /// Enabled positions in beginning, middle, end order
    pub fn enabled(&self) -> Vec<Position> {
        Position::ALL
            .iter()
            .copied()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().len()
    }

    pub fn is_empty(&self) -> bool {
        self.enabled_count() == 0
    }

    pub fn is_full(&self) -> bool {
        self.enabled_count() == Position::ALL.len()
    }
}

impl Default for PositionFlags {
    fn default() -> Self {
        Self::new(true, true, true)
    }
}

impl std::fmt::Display for PositionFlags {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.enabled().iter().map(|p| p.to_string()).collect();
        if names.is_empty() {
            write!(f, "none")
        } else {
            write!(f, "{}", names.join(", "))
        }
    }
}

/// How the enabled positions combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// The letter appears in at least one enabled position
    #[default]
    Any,
    /// The letter appears in every enabled position
    All,
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchMode::Any => write!(f, "any"),
            MatchMode::All => write!(f, "all"),
        }
    }
}

/// Live query parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// `None` is the "no letter selected" state
    pub letter: Option<Letter>,
    pub positions: PositionFlags,
    pub mode: MatchMode,
    pub count: usize,
}

impl QueryConfig {
    pub fn new(letter: Letter) -> Self {
        Self {
            letter: Some(letter),
            ..Default::default()
        }
    }

    /// Check the sample size bounds
    pub fn validate(&self) -> Result<()> {
        validate_count(self.count)
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            letter: None,
            positions: PositionFlags::default(),
            mode: MatchMode::Any,
            count: DEFAULT_COUNT,
        }
    }
}

/// Ensure a sample size lies within `MIN_COUNT..=MAX_COUNT`
pub fn validate_count(count: usize) -> Result<()> {
    if (MIN_COUNT..=MAX_COUNT).contains(&count) {
        Ok(())
    } else {
        Err(MailboxError::invalid_query(format!(
            "count must be between {} and {}, got {}",
            MIN_COUNT, MAX_COUNT, count
        )))
    }
}

/// Sampled words for one query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub letter: Option<Letter>,
    pub positions: PositionFlags,
    pub mode: MatchMode,
    /// Sampled words in draw order
    pub words: Vec<String>,
    /// Size of the full matching set the sample was drawn from
    pub total_matches: usize,
    pub generated_at: DateTime<Utc>,
}

impl QueryResult {
    /// Result with no words for the given query
    pub fn empty(config: &QueryConfig) -> Self {
        Self {
            letter: config.letter,
            positions: config.positions,
            mode: config.mode,
            words: Vec::new(),
            total_matches: 0,
            generated_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }
}
