use crate::error::TableError;

/// Rectangular string table: one header row plus data rows of equal width.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Normalise headers and pad every row to the widest one.
    ///
    /// Blank header names become `Unnamed: <i>` and repeated names get `.1`,
    /// `.2` suffixes so every column stays addressable by name.
    ///
    /// ```
    /// use gleaner_tables::Table;
    ///
    /// let t = Table::new(
    ///     vec!["Word".into(), "".into(), "Word".into()],
    ///     vec![vec!["a".into()]],
    /// );
    /// assert_eq!(t.headers(), ["Word", "Unnamed: 1", "Word.1"]);
    /// assert_eq!(t.rows()[0], ["a", "", ""]);
    /// ```
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(headers.len()))
            .max()
            .unwrap_or(0);

        let mut headers = headers;
        headers.resize(width, String::new());
        let headers = dedup_headers(headers);

        let rows = rows
            .into_iter()
            .map(|mut r| {
                r.resize(width, String::new());
                r
            })
            .collect();
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    /// Number of data rows (the header is not counted).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Stack tables vertically, aligning columns by header name. The result
    /// carries the union of headers in first-seen order; cells a source table
    /// lacks are left empty.
    pub fn concat<I>(tables: I) -> Table
    where
        I: IntoIterator<Item = Table>,
    {
        let tables: Vec<Table> = tables.into_iter().collect();
        let mut headers: Vec<String> = Vec::new();
        for t in &tables {
            for h in &t.headers {
                if !headers.contains(h) {
                    headers.push(h.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(tables.iter().map(Table::len).sum());
        for t in tables {
            let mapping: Vec<usize> = t
                .headers
                .iter()
                .filter_map(|h| headers.iter().position(|u| u == h))
                .collect();
            for row in t.rows {
                let mut out = vec![String::new(); headers.len()];
                for (cell, &target) in row.into_iter().zip(&mapping) {
                    out[target] = cell;
                }
                rows.push(out);
            }
        }
        Table { headers, rows }
    }

    /// Keep two columns picked by header name.
    pub fn select_named(&self, first: &str, second: &str) -> Result<Selection, TableError> {
        let a = self
            .column_index(first)
            .ok_or_else(|| TableError::MissingColumn(first.to_string()))?;
        let b = self
            .column_index(second)
            .ok_or_else(|| TableError::MissingColumn(second.to_string()))?;
        Ok(self.project(a, b))
    }

    /// Keep two columns picked by zero-based position.
    pub fn select_indices(&self, first: usize, second: usize) -> Result<Selection, TableError> {
        for index in [first, second] {
            if index >= self.width() {
                return Err(TableError::ColumnOutOfRange {
                    index,
                    width: self.width(),
                });
            }
        }
        Ok(self.project(first, second))
    }

    fn project(&self, a: usize, b: usize) -> Selection {
        let rows = self
            .rows
            .iter()
            .filter_map(|r| Row::new(&r[a], &r[b]))
            .collect();
        Selection {
            columns: [self.headers[a].clone(), self.headers[b].clone()],
            rows,
        }
    }
}

/// The table with the most data rows; the earliest wins a tie.
pub fn largest(tables: Vec<Table>) -> Option<Table> {
    let mut best: Option<Table> = None;
    for t in tables {
        if best.as_ref().is_none_or(|b| t.len() > b.len()) {
            best = Some(t);
        }
    }
    best
}

fn dedup_headers(headers: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(headers.len());
    for (i, h) in headers.into_iter().enumerate() {
        let base = if h.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            h
        };
        let mut name = base.clone();
        let mut n = 1;
        while out.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        out.push(name);
    }
    out
}

/// Two non-empty text fields lifted from one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub first: String,
    pub second: String,
}

impl Row {
    /// `None` when either side is blank.
    pub fn new(first: &str, second: &str) -> Option<Row> {
        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() {
            return None;
        }
        Some(Row {
            first: first.to_string(),
            second: second.to_string(),
        })
    }
}

/// Two named columns of non-empty rows, ready for export and analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub columns: [String; 2],
    pub rows: Vec<Row>,
}

impl Selection {
    pub fn renamed(mut self, first: &str, second: &str) -> Self {
        self.columns = [first.to_string(), second.to_string()];
        self
    }

    pub fn first_column(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.first.as_str())
    }

    pub fn second_column(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.second.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
