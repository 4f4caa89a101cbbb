//! Table scraping pipeline: fetch a page, pull its HTML tables, keep two
//! columns, export them, and summarise the text.
//!
//! - [`fetch`]: browser-flavoured page download + table filtering
//! - [`parse`]: `<table>` → [`Table`] conversion
//! - [`table`]: concatenation, largest-table pick, two-column selection
//! - [`words`]: top-N frequent words of a column
//! - [`templates`]: five-sentence template filler
//! - [`export`]: `.xlsx` / `.csv` writer for a [`Selection`]
pub mod error;
pub mod export;
pub mod fetch;
pub mod parse;
pub mod table;
pub mod templates;
pub mod words;

pub use error::{ExportError, TableError};
pub use export::{ExportFormat, export_selection};
pub use fetch::PageFetcher;
pub use parse::parse_tables;
pub use table::{Row, Selection, Table, largest};
pub use templates::Templates;
pub use words::{TOP_WORDS, WordCount, top_words, words_only};
