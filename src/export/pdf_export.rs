// src/export/pdf_export.rs

use crate::errors::{AppError, AppResult};
use crate::export::model::{get_headers, records_to_table};
use crate::export::pdf::PdfManager;
use crate::export::{HourExport, notify_export_success};
use crate::ui::messages::info;
use std::io;
use std::path::Path;

/// Export PDF through PdfManager and the generated table.
pub(crate) fn export_pdf(records: &[HourExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let headers = get_headers();
    let data_vec = records_to_table(records);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, &headers, &data_vec);

    pdf.save(path)
        .map_err(|e| AppError::from(io::Error::other(format!("PDF export error: {e}"))))?;

    notify_export_success("PDF", path);
    Ok(())
}
