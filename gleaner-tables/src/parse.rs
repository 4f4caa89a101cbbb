//! HTML table extraction on top of `scraper`.
//!
//! Only rows owned by a table are read (directly or through
//! `thead`/`tbody`/`tfoot`), so a table nested inside a cell shows up as its
//! own [`Table`] instead of leaking rows into its parent.
use crate::table::Table;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("static selector"));

/// Parse every `<table>` in `html`. The first row of each table is its
/// header. With `pattern`, only tables whose text matches are kept.
///
/// ```
/// use gleaner_tables::parse_tables;
///
/// let html = "<table><tr><th>Latin</th><th>Translation</th></tr>\
///             <tr><td>ave</td><td>hail</td></tr></table>";
/// let tables = parse_tables(html, None);
/// assert_eq!(tables.len(), 1);
/// assert_eq!(tables[0].headers(), ["Latin", "Translation"]);
/// assert_eq!(tables[0].rows()[0], ["ave", "hail"]);
/// ```
pub fn parse_tables(html: &str, pattern: Option<&Regex>) -> Vec<Table> {
    let doc = Html::parse_document(html);
    let mut out = Vec::new();
    for table in doc.select(&TABLE) {
        if let Some(re) = pattern {
            let text: String = table.text().collect();
            if !re.is_match(&text) {
                continue;
            }
        }
        let mut rows = own_rows(table).into_iter().map(row_cells);
        let Some(headers) = rows.next() else {
            continue;
        };
        out.push(Table::new(headers, rows.collect()));
    }
    tracing::debug!(target: "tables.parse", tables = out.len(), "parsed html tables");
    out
}

fn own_rows(table: ElementRef<'_>) -> Vec<ElementRef<'_>> {
    let mut rows = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => rows.push(child),
            "thead" | "tbody" | "tfoot" => rows.extend(
                child
                    .children()
                    .filter_map(ElementRef::wrap)
                    .filter(|el| el.value().name() == "tr"),
            ),
            _ => {}
        }
    }
    rows
}

fn row_cells(row: ElementRef<'_>) -> Vec<String> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|el| matches!(el.value().name(), "th" | "td"))
        .map(cell_text)
        .collect()
}

fn cell_text(cell: ElementRef<'_>) -> String {
    let raw: Vec<&str> = cell.text().collect();
    raw.join(" ").split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body>
  <table class="wikitable">
    <thead><tr><th>Latin</th><th>Translation</th><th>Notes</th></tr></thead>
    <tbody>
      <tr><td><i>ab  initio</i></td><td>from the
          beginning</td><td></td></tr>
      <tr><td>ad hoc</td><td>for this</td></tr>
    </tbody>
  </table>
  <table><tr><td>Menu</td></tr><tr><td>Home</td></tr></table>
  <table>
    <tr><th>Outer</th></tr>
    <tr><td><table><tr><th>Inner</th></tr><tr><td>x</td></tr></table></td></tr>
  </table>
</body></html>"#;

    #[test]
    fn reads_headers_rows_and_normalises_whitespace() {
        let tables = parse_tables(PAGE, None);
        let first = &tables[0];
        assert_eq!(first.headers(), ["Latin", "Translation", "Notes"]);
        assert_eq!(first.rows()[0], ["ab initio", "from the beginning", ""]);
        assert_eq!(first.rows()[1], ["ad hoc", "for this", ""]);
    }

    #[test]
    fn pattern_filters_tables_by_text() {
        let re = Regex::new("Latin").unwrap();
        let tables = parse_tables(PAGE, Some(&re));
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 2);
    }

    #[test]
    fn nested_tables_stay_separate() {
        let tables = parse_tables(PAGE, None);
        assert_eq!(tables.len(), 4);
        let outer = &tables[2];
        assert_eq!(outer.headers(), ["Outer"]);
        assert_eq!(outer.len(), 1);
        let inner = &tables[3];
        assert_eq!(inner.headers(), ["Inner"]);
        assert_eq!(inner.rows()[0], ["x"]);
    }

    #[test]
    fn page_without_tables_yields_nothing() {
        assert!(parse_tables("<p>no data</p>", None).is_empty());
    }
}
