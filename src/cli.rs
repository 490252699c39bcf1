//! Command line parsing

use std::path::PathBuf;

use crate::cli_error;
use crate::config::AppConfig;
use crate::error::Result;
use crate::highlight::MarkupStyle;
use crate::types::{validate_count, Letter, MatchMode, PositionFlags, QueryConfig};

/// What the binary should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Version,
    /// Prompt-driven session
    Interactive,
    /// Print one result and exit
    Query(QueryConfig),
}

/// Output format for one-shot queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub command: Command,
    pub format: OutputFormat,
    pub explain: bool,
    pub seed: Option<u64>,
    pub file: Option<PathBuf>,
    pub url: Option<String>,
    pub count: Option<usize>,
    pub markup: Option<MarkupStyle>,
}

impl CliArgs {
    /// Parse arguments, excluding the program name
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|a| a.as_ref().to_string()).collect();
        let mut iter = args.iter();

        let mut letter: Option<Letter> = None;
        let mut positions = PositionFlags::default();
        let mut mode = MatchMode::Any;
        let mut interactive = false;
        let mut parsed = CliArgs {
            command: Command::Interactive,
            format: OutputFormat::Text,
            explain: false,
            seed: None,
            file: None,
            url: None,
            count: None,
            markup: None,
        };

        while let Some(arg) = iter.next() {
            let flag = arg.as_str();
            let mut value = |name: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| cli_error!("{} requires a value", name))
            };

            match flag {
                "-h" | "--help" => {
                    parsed.command = Command::Help;
                    return Ok(parsed);
                }
                "-V" | "--version" => {
                    parsed.command = Command::Version;
                    return Ok(parsed);
                }
                "-i" | "--interactive" => interactive = true,
                "-l" | "--letter" => letter = Some(parse_letter(&value(flag)?)?),
                "-p" | "--positions" => {
                    positions = PositionFlags::parse_list(&value(flag)?)
                        .map_err(|e| cli_error!("{}", e))?;
                }
                "--all" => mode = MatchMode::All,
                "--any" => mode = MatchMode::Any,
                "-n" | "--count" => {
                    let raw = value(flag)?;
                    let count: usize = raw
                        .parse()
                        .map_err(|_| cli_error!("--count expects a number, got '{}'", raw))?;
                    validate_count(count).map_err(|e| cli_error!("{}", e))?;
                    parsed.count = Some(count);
                }
                "--seed" => {
                    let raw = value(flag)?;
                    parsed.seed = Some(
                        raw.parse()
                            .map_err(|_| cli_error!("--seed expects an unsigned integer, got '{}'", raw))?,
                    );
                }
                "--file" => parsed.file = Some(PathBuf::from(value(flag)?)),
                "--url" => parsed.url = Some(value(flag)?),
                "--json" => parsed.format = OutputFormat::Json,
                "--markdown" => parsed.markup = Some(MarkupStyle::Markdown),
                "--html" => parsed.markup = Some(MarkupStyle::Html),
                "--explain" => parsed.explain = true,
                other if other.starts_with('-') => {
                    return Err(cli_error!("unknown option '{}'", other));
                }
                other => {
                    if letter.is_some() {
                        return Err(cli_error!("unexpected argument '{}'", other));
                    }
                    letter = Some(parse_letter(other)?);
                }
            }
        }

        parsed.command = match letter {
            Some(letter) if !interactive => Command::Query(QueryConfig {
                letter: Some(letter),
                positions,
                mode,
                count: parsed.count.unwrap_or(crate::types::DEFAULT_COUNT),
            }),
            _ => Command::Interactive,
        };

        Ok(parsed)
    }

    /// Apply flag overrides to the environment configuration
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(path) = &self.file {
            config.word_list_path = Some(path.clone());
        }
        if let Some(url) = &self.url {
            config.word_list_url = url.clone();
            // An explicit URL wins over a path from the environment
            if self.file.is_none() {
                config.word_list_path = None;
            }
        }
        if let Some(count) = self.count {
            config.count = count;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(markup) = self.markup {
            config.markup = markup;
        }
    }

    /// Query settings after config defaults are known
    pub fn query_config(&self, config: &AppConfig) -> Option<QueryConfig> {
        match &self.command {
            Command::Query(query) => Some(QueryConfig {
                count: self.count.unwrap_or(config.count),
                ..query.clone()
            }),
            _ => None,
        }
    }
}

fn parse_letter(input: &str) -> Result<Letter> {
    Letter::parse(input).map_err(|e| cli_error!("{}", e))
}

/// Usage text
pub fn help_text() -> String {
    format!(
        "📬 Mailbox - find letters within words\n\
         ═══════════════════════════════════════\n\
         \n\
         USAGE:\n\
         \x20   mailbox [OPTIONS] [LETTER]\n\
         \n\
         Without a letter, mailbox starts an interactive session.\n\
         \n\
         OPTIONS:\n\
         \x20   -l, --letter <A-Z>      Letter to look for\n\
         \x20   -p, --positions <LIST>  Comma list of beginning,middle,end (b,m,e) [default: all]\n\
         \x20       --all               Require the letter in every selected position\n\
         \x20       --any               Accept the letter in any selected position [default]\n\
         \x20   -n, --count <{min}-{max}>      Number of words [default: {default}]\n\
         \x20       --seed <N>          Seed the random word and color choice\n\
         \x20       --file <PATH>       Load words from a local file\n\
         \x20       --url <URL>         Load words from this URL\n\
         \x20       --json              Print the result as JSON\n\
         \x20       --markdown          Use **bold** instead of colored HTML spans\n\
         \x20       --explain           Describe the derived word rule\n\
         \x20   -i, --interactive       Start the interactive session\n\
         \x20   -h, --help              Print help\n\
         \x20   -V, --version           Print version\n\
         \n\
         EXAMPLES:\n\
         \x20   mailbox                        # Interactive session\n\
         \x20   mailbox e -p m,e               # Words with E in the middle or at the end\n\
         \x20   mailbox a -p b,e --all -n 3    # Words starting and ending with A\n\
         \n\
         ENVIRONMENT VARIABLES:\n\
         \x20   MAILBOX_WORD_LIST_URL   Word list URL\n\
         \x20   MAILBOX_WORD_LIST_PATH  Local word list file\n\
         \x20   MAILBOX_COUNT           Default number of words\n\
         \x20   MAILBOX_SEED            Random seed\n\
         \x20   MAILBOX_TIMEOUT_SECS    Download timeout (default: 30)\n\
         \x20   MAILBOX_MARKUP          html or markdown\n\
         \x20   RUST_LOG                Log filter (default: warn)",
        min = crate::types::MIN_COUNT,
        max = crate::types::MAX_COUNT,
        default = crate::types::DEFAULT_COUNT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MailboxError;

    #[test]
    fn test_no_args_is_interactive() {
        let args = CliArgs::parse(Vec::<String>::new()).unwrap();
        assert_eq!(args.command, Command::Interactive);
    }

    #[test]
    fn test_full_query() {
        let args = CliArgs::parse(["a", "-p", "b,e", "--all", "-n", "3", "--seed", "9", "--json"]).unwrap();
        let Command::Query(query) = &args.command else {
            panic!("expected a query, got {:?}", args.command);
        };
        assert_eq!(query.letter, Some(Letter::parse("a").unwrap()));
        assert_eq!(query.positions, PositionFlags::new(true, false, true));
        assert_eq!(query.mode, MatchMode::All);
        assert_eq!(query.count, 3);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_letter_flag_and_interactive() {
        let args = CliArgs::parse(["--letter", "Q"]).unwrap();
        assert!(matches!(args.command, Command::Query(_)));

        let args = CliArgs::parse(["-l", "q", "-i"]).unwrap();
        assert_eq!(args.command, Command::Interactive);
    }

    #[test]
    fn test_help_short_circuits() {
        let args = CliArgs::parse(["x", "--help", "--bogus"]).unwrap();
        assert_eq!(args.command, Command::Help);
        assert!(help_text().contains("USAGE"));
    }

    #[test]
    fn test_errors() {
        for bad in [
            vec!["7"],
            vec!["ab"],
            vec!["a", "b"],
            vec!["a", "--count"],
            vec!["a", "--count", "0"],
            vec!["a", "--count", "many"],
            vec!["a", "-p", "top"],
            vec!["a", "--wat"],
            vec!["a", "--seed", "-3"],
        ] {
            let err = CliArgs::parse(bad.clone()).unwrap_err();
            assert!(matches!(err, MailboxError::Cli { .. }), "{:?}", bad);
        }
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig {
            word_list_path: Some(PathBuf::from("/env/words.txt")),
            ..AppConfig::default()
        };
        let args = CliArgs::parse(["e", "--url", "http://localhost/words.txt", "--markdown", "--seed", "5"]).unwrap();
        args.apply(&mut config);

        assert_eq!(config.word_list_url, "http://localhost/words.txt");
        assert_eq!(config.word_list_path, None);
        assert_eq!(config.markup, MarkupStyle::Markdown);
        assert_eq!(config.seed, Some(5));
    }

    #[test]
    fn test_count_falls_back_to_config() {
        let config = AppConfig {
            count: 8,
            ..AppConfig::default()
        };
        let args = CliArgs::parse(["e"]).unwrap();
        assert_eq!(args.query_config(&config).unwrap().count, 8);

        let args = CliArgs::parse(["e", "-n", "2"]).unwrap();
        assert_eq!(args.query_config(&config).unwrap().count, 2);
    }
}
