//! Letter highlighting and result rendering

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{MailboxError, Result};
use crate::types::{Letter, QueryResult};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(u32);

impl Color {
    pub const MAX: u32 = 0xFF_FF_FF;

    /// Bits above 24 are dropped
    pub fn from_rgb(rgb: u32) -> Self {
        Self(rgb & Self::MAX)
    }

    /// Parse `#rrggbb`, `0xrrggbb` or bare `rrggbb`
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let digits = trimmed
            .strip_prefix('#')
            .or_else(|| trimmed.strip_prefix("0x"))
            .unwrap_or(trimmed);

        if digits.is_empty() || digits.len() > 6 {
            return Err(MailboxError::parse(format!("invalid color '{}'", input), None));
        }

        u32::from_str_radix(digits, 16)
            .map(Self)
            .map_err(|e| MailboxError::parse(format!("invalid color '{}': {}", input, e), None))
    }

    pub fn rgb(&self) -> u32 {
        self.0
    }

    /// CSS form, e.g. `#0a3bff`
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.0)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Markup used to emphasize the letter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkupStyle {
    /// Bold, colored inline HTML span
    #[default]
    Html,
    /// Markdown bold, no color
    Markdown,
}

impl MarkupStyle {
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim().to_lowercase().as_str() {
            "html" => Ok(MarkupStyle::Html),
            "markdown" | "md" => Ok(MarkupStyle::Markdown),
            other => Err(MailboxError::config(format!(
                "unknown markup style '{}': expected html or markdown",
                other
            ))),
        }
    }

    fn markup_pattern(&self) -> &'static str {
        match self {
            MarkupStyle::Html => r#"<span style="[^"]*">([^<]*)</span>"#,
            MarkupStyle::Markdown => r"\*\*([^*]*)\*\*",
        }
    }
}

impl std::fmt::Display for MarkupStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkupStyle::Html => write!(f, "html"),
            MarkupStyle::Markdown => write!(f, "markdown"),
        }
    }
}

/// Wraps occurrences of a letter in one emphasis style.
///
/// Runs of the letter share a single wrapper, and any markup already present
/// is removed first, so highlighting an already highlighted word changes
/// nothing.
#[derive(Debug, Clone)]
pub struct Highlighter {
    color: Color,
    style: MarkupStyle,
    existing_markup: Regex,
}

impl Highlighter {
    pub fn new(color: Color, style: MarkupStyle) -> Result<Self> {
        let existing_markup = Regex::new(style.markup_pattern())
            .map_err(|e| MailboxError::internal(e.to_string()))?;

        Ok(Self {
            color,
            style,
            existing_markup,
        })
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn style(&self) -> MarkupStyle {
        self.style
    }

    fn open(&self) -> String {
        match self.style {
            MarkupStyle::Html => format!(
                r#"<span style="color: {}; font-weight: bold;">"#,
                self.color.hex()
            ),
            MarkupStyle::Markdown => "**".to_string(),
        }
    }

    fn close(&self) -> &'static str {
        match self.style {
            MarkupStyle::Html => "</span>",
            MarkupStyle::Markdown => "**",
        }
    }

    /// Remove highlight markup, keeping the wrapped text
    pub fn strip(&self, text: &str) -> String {
        self.existing_markup.replace_all(text, "$1").into_owned()
    }

    /// Lowercase `word` with every run of `letter` wrapped once
    pub fn highlight(&self, word: &str, letter: Letter) -> String {
        let plain = self.strip(word).to_lowercase();
        let open = self.open();
        let mut out = String::with_capacity(plain.len() + open.len());
        let mut in_run = false;

        for c in plain.chars() {
            let hit = letter.matches(c);
            if hit && !in_run {
                out.push_str(&open);
            } else if !hit && in_run {
                out.push_str(self.close());
            }
            in_run = hit;
            out.push(c);
        }
        if in_run {
            out.push_str(self.close());
        }

        out
    }

    /// Markdown lines for a result: a header naming the letter, then one
    /// heading per word. An unselected letter renders nothing.
    pub fn render_lines(&self, result: &QueryResult) -> Vec<String> {
        let Some(letter) = result.letter else {
            return Vec::new();
        };

        let mut lines = Vec::with_capacity(result.words.len() + 1);
        lines.push(format!(r"# \[ {}{}{} \]", self.open(), letter, self.close()));
        lines.extend(
            result
                .words
                .iter()
                .map(|word| format!("# {}", self.highlight(word, letter))),
        );
        lines
    }

    pub fn render(&self, result: &QueryResult) -> String {
        self.render_lines(result).join("\n")
    }
}
