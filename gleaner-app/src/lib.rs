//! The `gleaner` command line: argument parsing, configuration, logging
//! set-up and the three pipelines.
pub mod cli;
pub mod console;
pub mod followers;
pub mod phrases;
pub mod tables;

use anyhow::Context;
use cli::Command;
use console::Console;
use gleaner_common::observability::{LogConfig, LogFormat};
use gleaner_config::{GleanerConfig, GleanerConfigLoader, LogSettings};
use gleaner_tables::{PageFetcher, TOP_WORDS, Templates, top_words, words_only};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Read when `--config` is not given; absence is fine.
pub const DEFAULT_CONFIG_FILE: &str = "gleaner.yaml";

/// An explicit path must exist; the default file is optional.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<GleanerConfig> {
    let loader = match path {
        Some(path) => GleanerConfigLoader::new().with_file(path),
        None => GleanerConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    loader.load().with_context(|| match path {
        Some(path) => format!("loading {}", path.display()),
        None => "loading configuration".to_string(),
    })
}

/// Logging set-up from the `log` section; `-v` forces stderr output and
/// raises the default level.
pub fn log_config(settings: &LogSettings, verbose: u8) -> LogConfig {
    let default_filter = match verbose {
        0 => settings.filter.clone(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    LogConfig {
        app_name: "gleaner",
        log_dir: settings.dir.as_ref().map(PathBuf::from),
        emit_stderr: settings.stderr || verbose > 0,
        format: LogFormat::parse(&settings.format),
        default_filter,
    }
}

pub async fn run<R: BufRead, W: Write>(
    command: Command,
    cfg: &GleanerConfig,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    match command {
        Command::Phrases(args) => phrases::run(args, cfg, console).await,
        Command::Tables(args) => tables::run(args, cfg, console).await,
        Command::Followers(args) => followers::run(args, cfg, console).await,
    }
}

pub(crate) fn page_fetcher(cfg: &GleanerConfig) -> PageFetcher {
    PageFetcher::new()
        .with_timeout(Duration::from_secs(cfg.http.timeout_secs))
        .with_retries(cfg.http.retries)
}

/// Print the top words of one column and return them without counts.
pub(crate) fn print_top_words<'a, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    column: &str,
    texts: impl Iterator<Item = &'a str>,
) -> io::Result<Vec<String>> {
    let top = top_words(texts, TOP_WORDS);
    let shown: Vec<String> = top
        .iter()
        .map(|w| format!("{} ({})", w.word, w.count))
        .collect();
    console.say(format_args!(
        "Top {TOP_WORDS} words in {column}: {}",
        shown.join(", ")
    ))?;
    Ok(words_only(&top))
}

pub(crate) fn print_sentences<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    templates: &Templates,
    words: &[String],
) -> io::Result<()> {
    for (i, sentence) in templates.fill(words).iter().enumerate() {
        console.say(format_args!("{}. {sentence}", i + 1))?;
    }
    Ok(())
}
