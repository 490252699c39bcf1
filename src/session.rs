//! Interactive session
//!
//! [`Session`] holds the live query parameters and redraws on refresh;
//! [`run_interactive`] drives it with terminal prompts.

use inquire::validator::Validation;
use inquire::{Confirm, CustomType, MultiSelect, Select};

use crate::error::{MailboxError, Result};
use crate::highlight::{Highlighter, MarkupStyle};
use crate::matcher::{Matcher, WordMatcher};
use crate::sample::Sampler;
use crate::types::{Letter, MatchMode, Position, PositionFlags, QueryConfig, QueryResult, MAX_COUNT, MIN_COUNT};

const NO_LETTER: &str = "(none)";
const MODE_ANY: &str = "the letter may be in any selected position";
const MODE_ALL: &str = "it must be in all selected positions";

/// One rendered refresh
#[derive(Debug, Clone)]
pub struct Refresh {
    pub result: QueryResult,
    pub matcher: Matcher,
    pub lines: Vec<String>,
}

/// Live query parameters plus the pieces needed to answer them.
///
/// Parameters can be replaced freely between refreshes; nothing from one
/// refresh carries into the next apart from the random source.
pub struct Session {
    matcher: WordMatcher,
    sampler: Sampler,
    markup: MarkupStyle,
    config: QueryConfig,
}

impl Session {
    pub fn new(matcher: WordMatcher, sampler: Sampler, markup: MarkupStyle, config: QueryConfig) -> Self {
        Self {
            matcher,
            sampler,
            markup,
            config,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn set_letter(&mut self, letter: Option<Letter>) {
        self.config.letter = letter;
    }

    pub fn set_positions(&mut self, positions: PositionFlags) {
        self.config.positions = positions;
    }

    pub fn set_mode(&mut self, mode: MatchMode) {
        self.config.mode = mode;
    }

    /// Rejects counts outside `MIN_COUNT..=MAX_COUNT`
    pub fn set_count(&mut self, count: usize) -> Result<()> {
        crate::types::validate_count(count)?;
        self.config.count = count;
        Ok(())
    }

    /// Re-run the current query with a fresh sample and a fresh color.
    ///
    /// Bad parameters give an empty refresh rather than an error.
    pub fn refresh(&mut self) -> Result<Refresh> {
        let matcher = Matcher::derive(self.config.letter, self.config.positions, self.config.mode);
        let result = match self.matcher.query(&self.config, &mut self.sampler) {
            Ok(result) => result,
            Err(e) if !e.is_fatal() => {
                tracing::warn!(error = %e, "Refresh rejected, showing no words");
                QueryResult::empty(&self.config)
            }
            Err(e) => return Err(e),
        };

        let highlighter = Highlighter::new(self.sampler.color(), self.markup)?;
        let lines = highlighter.render_lines(&result);

        Ok(Refresh {
            result,
            matcher,
            lines,
        })
    }
}

/// What to do after showing a result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NextStep {
    Refresh,
    Change,
    Quit,
}

/// Prompt for settings, show words, repeat until the user quits.
///
/// Ctrl-C / Esc at any prompt ends the session cleanly.
pub fn run_interactive(session: &mut Session) -> Result<()> {
    println!("📬 Mailbox: find letters within words");
    println!("═══════════════════════════════════════");
    println!("Choose a letter and where it should appear in a word.");
    println!();

    if !prompt_settings(session)? {
        return Ok(());
    }

    loop {
        let refresh = session.refresh()?;
        print_refresh(&refresh);

        let step = match Select::new(
            "What next?",
            vec!["Refresh", "Change settings", "Quit"],
        )
        .prompt()
        {
            Ok("Refresh") => NextStep::Refresh,
            Ok("Change settings") => NextStep::Change,
            Ok(_) => NextStep::Quit,
            Err(e) if is_cancel(&e) => NextStep::Quit,
            Err(e) => return Err(e.into()),
        };

        match step {
            NextStep::Refresh => continue,
            NextStep::Change => {
                if !prompt_settings(session)? {
                    return Ok(());
                }
            }
            NextStep::Quit => return Ok(()),
        }
    }
}

fn print_refresh(refresh: &Refresh) {
    println!();
    if refresh.result.letter.is_none() {
        println!("💡 Pick a letter to see some words.");
    } else if refresh.result.is_empty() {
        println!("😔 No words match: {}.", refresh.matcher);
    } else {
        for line in &refresh.lines {
            println!("{}", line);
        }
        println!();
        println!(
            "📊 Showing {} of {} matching words",
            refresh.result.len(),
            refresh.result.total_matches
        );
    }
    println!();
}

/// Returns `false` when the user cancelled
fn prompt_settings(session: &mut Session) -> Result<bool> {
    let current = session.config().clone();

    let Some(letter) = cancellable(prompt_letter(current.letter))? else {
        return Ok(false);
    };
    let Some(positions) = cancellable(prompt_positions(current.positions))? else {
        return Ok(false);
    };
    let Some(mode) = cancellable(prompt_mode(current.mode))? else {
        return Ok(false);
    };
    let Some(count) = cancellable(prompt_count(current.count))? else {
        return Ok(false);
    };

    session.set_letter(letter);
    session.set_positions(positions);
    session.set_mode(mode);
    session.set_count(count)?;
    Ok(true)
}

fn prompt_letter(current: Option<Letter>) -> std::result::Result<Option<Letter>, inquire::InquireError> {
    let mut options: Vec<String> = Letter::alphabet().iter().map(|l| l.to_string()).collect();
    options.push(NO_LETTER.to_string());

    let start = current
        .and_then(|l| options.iter().position(|o| *o == l.to_string()))
        .unwrap_or(options.len() - 1);

    let choice = Select::new("Select a letter:", options)
        .with_starting_cursor(start)
        .with_page_size(10)
        .prompt()?;

    Ok(Letter::parse(&choice).ok())
}

fn prompt_positions(current: PositionFlags) -> std::result::Result<PositionFlags, inquire::InquireError> {
    let options: Vec<Position> = Position::ALL.to_vec();
    let defaults: Vec<usize> = options
        .iter()
        .enumerate()
        .filter(|(_, p)| current.is_enabled(**p))
        .map(|(i, _)| i)
        .collect();

    let chosen = MultiSelect::new("Where in the word?", options)
        .with_default(&defaults)
        .prompt()?;

    Ok(PositionFlags::from_positions(&chosen))
}

fn prompt_mode(current: MatchMode) -> std::result::Result<MatchMode, inquire::InquireError> {
    let any = Confirm::new("Match for any selected position?")
        .with_default(current == MatchMode::Any)
        .with_help_message(&format!("Yes: {}. No: {}.", MODE_ANY, MODE_ALL))
        .prompt()?;

    Ok(if any { MatchMode::Any } else { MatchMode::All })
}

fn prompt_count(current: usize) -> std::result::Result<usize, inquire::InquireError> {
    CustomType::<usize>::new("Number of words:")
        .with_default(current)
        .with_help_message(&format!("{} to {}", MIN_COUNT, MAX_COUNT))
        .with_validator(|count: &usize| -> std::result::Result<Validation, inquire::CustomUserError> {
            if (MIN_COUNT..=MAX_COUNT).contains(count) {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(
                    format!("Pick a number from {} to {}", MIN_COUNT, MAX_COUNT).into(),
                ))
            }
        })
        .prompt()
}

fn is_cancel(err: &inquire::InquireError) -> bool {
    matches!(
        err,
        inquire::InquireError::OperationCanceled | inquire::InquireError::OperationInterrupted
    )
}

/// `Ok(None)` for a cancelled prompt, errors for everything else
fn cancellable<T>(result: std::result::Result<T, inquire::InquireError>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if is_cancel(&e) => Ok(None),
        Err(e) => Err(MailboxError::from(e)),
    }
}
