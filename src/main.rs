//! Mailbox - find letters within words
//!
//! Pick a letter and a position (beginning, middle, end) and get a random
//! handful of common English words that use it.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use mailbox::{
    cli::{help_text, CliArgs, Command, OutputFormat},
    session::run_interactive,
    AppConfig, Corpus, CorpusCache, Highlighter, MailboxError, Matcher, QueryConfig, Sampler,
    Session, WordMatcher,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    init_logging();

    // Initialize the library
    if let Err(e) = mailbox::init() {
        eprintln!("❌ Failed to initialize: {}", e);
        process::exit(1);
    }

    let args = match CliArgs::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(2);
        }
    };

    match args.command {
        Command::Help => {
            println!("{}", help_text());
            return;
        }
        Command::Version => {
            println!("mailbox {}", mailbox::VERSION);
            return;
        }
        Command::Interactive | Command::Query(_) => {}
    }

    if let Err(e) = run(args).await {
        match e.downcast_ref::<MailboxError>() {
            Some(inner) => eprintln!("{}", inner.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(args: CliArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::from_env()?;
    args.apply(&mut config);

    let cache = CorpusCache::new(Arc::from(config.corpus_source()));
    let corpus = load_corpus(&cache).await?;
    if corpus.is_empty() {
        anyhow::bail!("the word list at {} is empty", cache.source_description());
    }

    let matcher = WordMatcher::new(corpus);
    let sampler = Sampler::new(config.seed);

    match args.query_config(&config) {
        Some(query) => print_query(&args, &config, &matcher, sampler, &query),
        None => {
            let start = QueryConfig {
                count: config.count,
                ..QueryConfig::default()
            };
            let mut session = Session::new(matcher, sampler, config.markup, start);
            tokio::task::spawn_blocking(move || run_interactive(&mut session))
                .await
                .context("interactive session panicked")??;
            Ok(())
        }
    }
}

/// Fetch the word list once, with a spinner while it downloads
async fn load_corpus(cache: &CorpusCache) -> anyhow::Result<Corpus> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("📥 Loading word list...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = cache.get().await;
    spinner.finish_and_clear();

    let corpus = result?;
    tracing::info!(
        source = %cache.source_description(),
        words = %corpus.len(),
        "Word list ready"
    );
    Ok(corpus)
}

fn print_query(
    args: &CliArgs,
    config: &AppConfig,
    matcher: &WordMatcher,
    mut sampler: Sampler,
    query: &QueryConfig,
) -> anyhow::Result<()> {
    let result = matcher.query(query, &mut sampler)?;
    let rule = Matcher::derive(query.letter, query.positions, query.mode);

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if args.explain {
        println!("🔎 Rule: the word {}", rule);
        println!();
    }

    if result.is_empty() {
        println!("😔 No words match: {}.", rule);
        return Ok(());
    }

    let highlighter = Highlighter::new(sampler.color(), config.markup)?;
    for line in highlighter.render_lines(&result) {
        println!("{}", line);
    }

    Ok(())
}
