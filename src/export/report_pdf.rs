//! Drawing of the assembled monthly work report.
//!
//! Layout: centered masthead, right-aligned print timestamp, an identity
//! block, then the project table with a bold totals row. Overflowing rows
//! continue on extra pages with the table header repeated.

use crate::core::report::MonthlyReport;
use crate::errors::AppResult;
use crate::export::pdf::{FontStyle, PdfManager};
use pdf_writer::Content;
use std::path::Path;

const ORG_COLOR: (f32, f32, f32) = (0.09, 0.0, 0.68);
const INK: (f32, f32, f32) = (0.10, 0.10, 0.10);
const MUTED: (f32, f32, f32) = (0.45, 0.45, 0.45);
const HEADER_BAND: (f32, f32, f32) = (0.85, 0.87, 0.90);
const ZEBRA_BAND: (f32, f32, f32) = (0.96, 0.96, 0.96);
const TOTALS_BAND: (f32, f32, f32) = (0.93, 0.94, 0.95);

pub fn write_report(report: &MonthlyReport, path: &Path) -> AppResult<()> {
    let mut pdf = PdfManager::new();

    let mut content = pdf.new_page();
    let mut y = pdf.page_h - pdf.margin;

    // Masthead
    let org_size = 16.0;
    let x = (pdf.page_w - pdf.text_width(&report.organization, org_size)) / 2.0;
    pdf.draw_text_rgb(
        &mut content,
        x,
        y,
        FontStyle::Bold,
        org_size,
        ORG_COLOR,
        &report.organization,
    );

    y -= 30.0;
    let title_size = 20.0;
    let x = (pdf.page_w - pdf.text_width(&report.title, title_size)) / 2.0;
    pdf.draw_text_rgb(
        &mut content,
        x,
        y,
        FontStyle::Bold,
        title_size,
        INK,
        &report.title,
    );

    y -= 18.0;
    let stamp_w = pdf.text_width(&report.printed_at, 9.0);
    pdf.draw_text_rgb(
        &mut content,
        pdf.page_w - pdf.margin - stamp_w,
        y,
        FontStyle::Oblique,
        9.0,
        MUTED,
        &report.printed_at,
    );

    // Identity block
    y -= 30.0;
    let mut lines: Vec<(&str, &str)> = vec![
        ("Mitarbeiter:", report.employee_name.as_str()),
        ("Telefonnummer:", report.phone_number.as_str()),
        ("Rolle:", report.role.as_str()),
    ];
    if let Some(rate) = &report.hourly_rate {
        lines.push(("Stundensatz:", rate));
    }
    lines.push(("Zeitraum:", report.period.as_str()));

    for (label, value) in lines {
        pdf.draw_text(&mut content, pdf.margin, y, FontStyle::Bold, 10.0, label);
        pdf.draw_text(
            &mut content,
            pdf.margin + 95.0,
            y,
            FontStyle::Regular,
            10.0,
            value,
        );
        y -= 16.0;
    }

    y -= 8.0;

    if let Some(notice) = &report.empty_notice {
        pdf.draw_text(&mut content, pdf.margin, y, FontStyle::Regular, 10.0, notice);
        pdf.finalize_page(content);
        pdf.save(path)?;
        return Ok(());
    }

    pdf.draw_text(
        &mut content,
        pdf.margin,
        y,
        FontStyle::Bold,
        13.0,
        "Bearbeitete Projekte",
    );
    y -= 24.0;

    // Table
    let money = report.total_earnings.is_some();
    let mut headers: Vec<&str> = vec!["Datum", "Projektname", "Gearbeitete Stunden"];
    if money {
        headers.push("Betrag");
    }

    let body: Vec<Vec<String>> = report
        .rows
        .iter()
        .map(|r| {
            let mut row = vec![r.date.clone(), r.project.clone(), r.hours.clone()];
            if money {
                row.push(r.earnings.clone().unwrap_or_default());
            }
            row
        })
        .collect();

    let mut totals: Vec<String> = vec![
        String::new(),
        "GESAMTSTUNDEN".to_string(),
        report.total_hours.clone(),
    ];
    if money {
        totals.push(report.total_earnings.clone().unwrap_or_default());
    }

    let mut sizing = body.clone();
    sizing.push(totals.clone());
    let col_widths = pdf.compute_col_widths(&headers, &sizing);
    let table_width: f32 = col_widths.iter().sum();

    draw_table_header(&pdf, &mut content, y, &col_widths, table_width, &headers);
    y -= pdf.row_h;

    for (i, row) in body.iter().enumerate() {
        if y - pdf.row_h < pdf.margin {
            pdf.finalize_page(content);
            content = pdf.new_page();
            y = pdf.page_h - pdf.margin - pdf.row_h;
            draw_table_header(&pdf, &mut content, y, &col_widths, table_width, &headers);
            y -= pdf.row_h;
        }

        if i % 2 == 0 {
            pdf.fill_row_band(&mut content, y, table_width, ZEBRA_BAND);
        }
        draw_table_row(&pdf, &mut content, y, &col_widths, row, FontStyle::Regular);
        y -= pdf.row_h;
    }

    if y - pdf.row_h < pdf.margin {
        pdf.finalize_page(content);
        content = pdf.new_page();
        y = pdf.page_h - pdf.margin - pdf.row_h;
    }
    pdf.fill_row_band(&mut content, y, table_width, TOTALS_BAND);
    draw_table_row(&pdf, &mut content, y, &col_widths, &totals, FontStyle::Bold);

    pdf.finalize_page(content);
    pdf.save(path)?;
    Ok(())
}

fn draw_table_header(
    pdf: &PdfManager,
    content: &mut Content,
    y: f32,
    col_widths: &[f32],
    table_width: f32,
    headers: &[&str],
) {
    pdf.fill_row_band(content, y, table_width, HEADER_BAND);
    let mut x = pdf.margin;
    for (i, header) in headers.iter().enumerate() {
        pdf.draw_text(
            content,
            x + 4.0,
            y + 5.0,
            FontStyle::Bold,
            pdf.header_font_size,
            header,
        );
        pdf.draw_cell_borders(content, x, y, col_widths[i], pdf.row_h);
        x += col_widths[i];
    }
}

fn draw_table_row(
    pdf: &PdfManager,
    content: &mut Content,
    y: f32,
    col_widths: &[f32],
    row: &[String],
    style: FontStyle,
) {
    let mut x = pdf.margin;
    for (i, cell) in row.iter().enumerate() {
        let w = col_widths[i];
        // numeric columns are right-aligned
        if i >= 2 {
            pdf.draw_text_right(content, x + w - 4.0, y + 5.0, style, pdf.font_size, cell);
        } else {
            pdf.draw_text(content, x + 4.0, y + 5.0, style, pdf.font_size, cell);
        }
        pdf.draw_cell_borders(content, x, y, w, pdf.row_h);
        x += w;
    }
}
