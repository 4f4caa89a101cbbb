use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "gleaner",
    version,
    about = "Scrape HTML tables and analyse social followers"
)]
pub struct Cli {
    /// YAML config file. Without it `gleaner.yaml` is read when present.
    #[arg(long, global = true, env = "GLEANER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Mirror logs to stderr; repeat for debug (-vv) or trace (-vvv).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape the Latin phrases list, export it and summarise translations.
    Phrases(PhrasesArgs),
    /// Scrape the largest table of any page and analyse two of its columns.
    Tables(TablesArgs),
    /// Collect, tag and export the followers of an account.
    Followers(FollowersArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct PhrasesArgs {
    /// Page to scrape instead of the configured phrases URL.
    #[arg(long)]
    pub url: Option<String>,
    /// `.xlsx` or `.csv` destination.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct TablesArgs {
    /// Page to scrape; asked for when omitted.
    #[arg(long)]
    pub url: Option<String>,
    /// Index of the main column; both indices are asked for unless given.
    #[arg(long, requires = "second")]
    pub first: Option<usize>,
    /// Index of the secondary column.
    #[arg(long, requires = "first")]
    pub second: Option<usize>,
    /// `.xlsx` or `.csv` destination.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FollowersArgs {
    /// Account whose followers are collected; asked for when omitted.
    pub target: Option<String>,
    /// Stop after this many followers (0 means all).
    #[arg(short, long)]
    pub limit: Option<usize>,
    /// Value of the `sessionid` cookie of a logged-in browser session.
    #[arg(long, env = "GLEANER_SESSION_ID", hide_env_values = true)]
    pub session_id: Option<String>,
    /// Concurrent profile lookups; overrides `social.workers`.
    #[arg(short, long)]
    pub workers: Option<usize>,
    /// CSV destination; defaults to `<target>_followers_analysis.csv`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_tables_flags() {
        let cli = Cli::try_parse_from([
            "gleaner", "-vv", "tables", "--url", "http://x", "--first", "1", "--second", "0",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Tables(args) => {
                assert_eq!(args.url.as_deref(), Some("http://x"));
                assert_eq!((args.first, args.second), (Some(1), Some(0)));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn column_flags_come_in_pairs() {
        assert!(Cli::try_parse_from(["gleaner", "tables", "--first", "1"]).is_err());
    }

    #[test]
    fn parses_followers_positional_target() {
        let cli = Cli::try_parse_from([
            "gleaner", "followers", "nasa", "--limit", "100", "--session-id", "abc",
        ])
        .unwrap();
        let Command::Followers(args) = cli.command else {
            panic!("expected followers");
        };
        assert_eq!(args.target.as_deref(), Some("nasa"));
        assert_eq!(args.limit, Some(100));
        assert_eq!(args.session_id.as_deref(), Some("abc"));
    }
}
