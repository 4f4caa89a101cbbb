use crate::cli::TablesArgs;
use crate::console::Console;
use crate::{page_fetcher, print_sentences, print_top_words};
use gleaner_config::GleanerConfig;
use gleaner_tables::{Templates, export_selection, largest};
use std::io::{BufRead, Write};
use std::path::PathBuf;

const MATCH_ANY: &str = ".+";
const COLUMN_A: &str = "Column_A";
const COLUMN_B: &str = "Column_B";

/// Interactive pipeline: largest table of any page, two columns picked by
/// index, export, word frequency and the analysis sentences.
pub async fn run<R: BufRead, W: Write>(
    args: TablesArgs,
    cfg: &GleanerConfig,
    console: &mut Console<R, W>,
) -> anyhow::Result<()> {
    console.say("\n--- Step 1: connection ---")?;
    let url = match args.url {
        Some(url) => url,
        None => console.url()?,
    };
    console.say(format_args!("Connecting to {url} ..."))?;
    let tables = match page_fetcher(cfg).fetch_tables(&url, MATCH_ANY).await {
        Ok(tables) => tables,
        Err(e) => return Ok(console.report("download failed", &e)?),
    };
    console.say(format_args!("Found {} tables.", tables.len()))?;
    let Some(table) = largest(tables) else {
        return Ok(console.say("No tables found on that page.")?);
    };
    console.say(format_args!(
        "Picked the largest table ({} rows).",
        table.len()
    ))?;

    console.say("\n--- Step 2: column selection ---")?;
    let (first, second) = match (args.first, args.second) {
        (Some(a), Some(b)) => (a, b),
        _ => console.column_pair(table.headers())?,
    };
    let selection = match table.select_indices(first, second) {
        Ok(selection) => selection.renamed(COLUMN_A, COLUMN_B),
        Err(e) => return Ok(console.report("column selection failed", &e)?),
    };

    console.say("\n--- Step 3: export ---")?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&cfg.tables.tables_output));
    if let Err(e) = export_selection(&output, &selection) {
        return Ok(console.report("export failed (close the file if it is open)", &e)?);
    }
    console.say(format_args!("Saved {} rows to {}", selection.len(), output.display()))?;

    console.say("\n--- Step 4: word frequency ---")?;
    print_top_words(console, COLUMN_A, selection.first_column())?;
    let words = print_top_words(console, COLUMN_B, selection.second_column())?;

    if !words.is_empty() {
        console.say("\n--- Step 5: new sentences ---")?;
        print_sentences(console, &Templates::analysis(), &words)?;
    }
    Ok(())
}
