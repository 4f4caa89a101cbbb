use crate::cli::PhrasesArgs;
use crate::console::Console;
use crate::{page_fetcher, print_sentences, print_top_words};
use gleaner_config::GleanerConfig;
use gleaner_tables::{Table, Templates, export_selection};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const MATCH: &str = "Latin";
const FIRST_COLUMN: &str = "Latin";
const SECOND_COLUMN: &str = "Translation";

/// Fixed-page pipeline: every phrases table, `Latin` and `Translation`
/// columns, export, word frequency and the ethics sentences.
pub async fn run<R: BufRead, W: Write>(
    args: PhrasesArgs,
    cfg: &GleanerConfig,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    let url = args.url.unwrap_or_else(|| cfg.tables.phrases_url.clone());
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&cfg.tables.phrases_output));

    console.say(format_args!("Connecting to {url} ..."))?;
    let tables = match page_fetcher(cfg).fetch_tables(&url, MATCH).await {
        Ok(tables) => tables,
        Err(e) => return Ok(console.report("scraping failed", &e)?),
    };
    console.say(format_args!("Found {} phrase tables.", tables.len()))?;

    let merged = Table::concat(tables);
    let selection = match merged.select_named(FIRST_COLUMN, SECOND_COLUMN) {
        Ok(selection) => selection,
        Err(e) => return Ok(console.report("unexpected table layout", &e)?),
    };

    console.say(format_args!(
        "Saving {} phrases to {} ...",
        selection.len(),
        output.display()
    ))?;
    if let Err(e) = export_selection(&output, &selection) {
        return Ok(console.report("export failed", &e)?);
    }

    console.say("\n--- Word frequency ---")?;
    print_top_words(console, FIRST_COLUMN, selection.first_column())?;
    let words = print_top_words(console, SECOND_COLUMN, selection.second_column())?;

    if !words.is_empty() {
        console.say("\n--- 5 new sentences ---")?;
        print_sentences(console, &Templates::ethics(), &words)?;
    }
    Ok(())
}
