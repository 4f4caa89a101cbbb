use crate::error::ExportError;
use crate::table::Selection;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Xlsx,
    Csv,
}

impl ExportFormat {
    /// `.csv` (any case) means CSV; everything else is written as a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Write the two selected columns (header row first, no index column).
pub fn export_selection(path: &Path, selection: &Selection) -> Result<ExportFormat, ExportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    }

    let format = ExportFormat::from_path(path);
    match format {
        ExportFormat::Csv => write_csv(path, selection)?,
        ExportFormat::Xlsx => write_xlsx(path, selection)?,
    }
    tracing::info!(
        target: "tables.export",
        path = %path.display(),
        rows = selection.len(),
        ?format,
        "selection exported"
    );
    Ok(format)
}

fn write_csv(path: &Path, selection: &Selection) -> Result<(), ExportError> {
    let csv_err = |source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::Writer::from_path(path).map_err(csv_err)?;
    writer.write_record(&selection.columns).map_err(csv_err)?;
    for row in &selection.rows {
        writer
            .write_record([row.first.as_str(), row.second.as_str()])
            .map_err(csv_err)?;
    }
    writer.flush().map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_xlsx(path: &Path, selection: &Selection) -> Result<(), ExportError> {
    let xlsx_err = |source| ExportError::Xlsx {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();
    let sheet = workbook.add_worksheet();

    for (col, name) in selection.columns.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, name.as_str(), &bold)
            .map_err(xlsx_err)?;
    }
    for (i, row) in selection.rows.iter().enumerate() {
        let r = (i + 1) as u32;
        sheet.write_string(r, 0, row.first.as_str()).map_err(xlsx_err)?;
        sheet.write_string(r, 1, row.second.as_str()).map_err(xlsx_err)?;
    }
    workbook.save(path).map_err(xlsx_err)
}
