use pdf_writer::{Content, Name, Pdf, Rect, Ref};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Which of the registered base fonts to draw with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Oblique,
}

impl FontStyle {
    fn resource_name(self) -> Name<'static> {
        match self {
            FontStyle::Regular => Name(b"F1"),
            FontStyle::Bold => Name(b"F2"),
            FontStyle::Oblique => Name(b"F3"),
        }
    }
}

/// Encode text as WinAnsi (CP1252) bytes. The report contains € and German
/// umlauts, which raw UTF-8 bytes would garble inside a Type1 font stream.
/// Characters outside the code page degrade to '?'.
pub(crate) fn winansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c as u32 {
            0x20AC => 0x80, // €
            0x201A => 0x82,
            0x0192 => 0x83,
            0x201E => 0x84,
            0x2026 => 0x85,
            0x2020 => 0x86,
            0x2021 => 0x87,
            0x02C6 => 0x88,
            0x2030 => 0x89,
            0x0160 => 0x8A,
            0x2039 => 0x8B,
            0x0152 => 0x8C,
            0x017D => 0x8E,
            0x2018 => 0x91,
            0x2019 => 0x92,
            0x201C => 0x93,
            0x201D => 0x94,
            0x2022 => 0x95,
            0x2013 => 0x96,
            0x2014 => 0x97,
            0x02DC => 0x98,
            0x2122 => 0x99,
            0x0161 => 0x9A,
            0x203A => 0x9B,
            0x0153 => 0x9C,
            0x017E => 0x9E,
            0x0178 => 0x9F,
            c @ (0x20..=0x7E | 0xA0..=0xFF) => c as u8,
            _ => b'?',
        })
        .collect()
}

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    page_refs: Vec<Ref>,
    current_content_id: Option<Ref>,

    pub(crate) page_w: f32,
    pub(crate) page_h: f32,
    pub(crate) margin: f32,
    pub(crate) row_h: f32,

    next_id: i32,
    font_regular: Ref,
    font_bold: Ref,
    font_oblique: Ref,

    pub(crate) font_size: f32,
    pub(crate) header_font_size: f32,
    pub(crate) title_font_size: f32,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();

        // Manually managed ids: catalog, pages, then the three fonts.
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_regular = Ref::new(3);
        let font_bold = Ref::new(4);
        let font_oblique = Ref::new(5);
        let next_id = 6;

        pdf.type1_font(font_regular)
            .base_font(Name(b"Helvetica"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(font_bold)
            .base_font(Name(b"Helvetica-Bold"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));
        pdf.type1_font(font_oblique)
            .base_font(Name(b"Helvetica-Oblique"))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            page_refs: Vec::new(),
            current_content_id: None,

            page_w: 595.0,
            page_h: 842.0,
            margin: 50.0,
            row_h: 20.0,

            next_id,
            font_regular,
            font_bold,
            font_oblique,

            font_size: 10.0,
            header_font_size: 11.0,
            title_font_size: 14.0,
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    /// Open a new page and return its content stream.
    pub(crate) fn new_page(&mut self) -> Content {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();

        self.page_refs.push(page_id);

        let mut page = self.pdf.page(page_id);
        page.parent(self.pages_id)
            .media_box(Rect::new(0.0, 0.0, self.page_w, self.page_h))
            .contents(content_id);

        page.resources()
            .fonts()
            .pair(Name(b"F1"), self.font_regular)
            .pair(Name(b"F2"), self.font_bold)
            .pair(Name(b"F3"), self.font_oblique);

        self.current_content_id = Some(content_id);

        Content::new()
    }

    /// Write the current page's stream.
    pub(crate) fn finalize_page(&mut self, content: Content) {
        if let Some(id) = self.current_content_id {
            self.pdf.stream(id, &content.finish());
        }
    }

    fn build_pages_tree(&mut self) {
        let mut pages = self.pdf.pages(self.pages_id);
        pages.count(self.page_refs.len() as i32);
        pages.kids(self.page_refs.clone());
    }

    /// Rough width estimate for Helvetica at the given size, used for
    /// right-aligned and centered text.
    pub(crate) fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * 0.56
    }

    pub(crate) fn draw_text(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        style: FontStyle,
        size: f32,
        text: &str,
    ) {
        content.begin_text();
        content.set_font(style.resource_name(), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(pdf_writer::Str(&winansi(text)));
        content.end_text();
    }

    /// Like draw_text, with an explicit fill color for this run only.
    pub(crate) fn draw_text_rgb(
        &self,
        content: &mut Content,
        x: f32,
        y: f32,
        style: FontStyle,
        size: f32,
        rgb: (f32, f32, f32),
        text: &str,
    ) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        self.draw_text(content, x, y, style, size, text);
        content.restore_state();
    }

    pub(crate) fn draw_text_right(
        &self,
        content: &mut Content,
        x_right: f32,
        y: f32,
        style: FontStyle,
        size: f32,
        text: &str,
    ) {
        let x = x_right - self.text_width(text, size);
        self.draw_text(content, x, y, style, size, text);
    }

    pub(crate) fn draw_text_centered(
        &self,
        content: &mut Content,
        y: f32,
        style: FontStyle,
        size: f32,
        text: &str,
    ) {
        let x = (self.page_w - self.text_width(text, size)) / 2.0;
        self.draw_text(content, x, y, style, size, text);
    }

    pub(crate) fn draw_cell_borders(&self, content: &mut Content, x: f32, y: f32, w: f32, h: f32) {
        content.save_state();
        content.set_stroke_rgb(0.65, 0.65, 0.65);
        content.rect(x, y, w, h);
        content.stroke();
        content.restore_state();
    }

    pub(crate) fn fill_row_band(
        &self,
        content: &mut Content,
        y: f32,
        width: f32,
        rgb: (f32, f32, f32),
    ) {
        content.save_state();
        content.set_fill_rgb(rgb.0, rgb.1, rgb.2);
        content.rect(self.margin, y, width, self.row_h);
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_row(
        &self,
        content: &mut Content,
        y: f32,
        col_widths: &[f32],
        x_start: f32,
        row: &[String],
        style: FontStyle,
        font_size: f32,
    ) {
        let mut x = x_start;

        for (i, text) in row.iter().enumerate() {
            let w = col_widths[i];
            self.draw_text(content, x + 4.0, y + 5.0, style, font_size, text);
            self.draw_cell_borders(content, x, y, w, self.row_h);
            x += w;
        }
    }

    /// Column widths sized to header + content, scaled down to the page.
    pub(crate) fn compute_col_widths(&self, headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut widths: Vec<f32> = headers.iter().map(|h| h.len() as f32 * 6.5).collect();

        for row in rows {
            for (i, cell) in row.iter().enumerate() {
                let w = (cell.chars().count() as f32 * 6.2).max(widths[i]);
                widths[i] = w;
            }
        }

        let total: f32 = widths.iter().sum();
        let max = self.page_w - 2.0 * self.margin;

        if total > max {
            let scale = max / total;
            for w in &mut widths {
                *w *= scale;
            }
        }

        widths
    }

    fn draw_page_header_footer(&self, content: &mut Content, title: &str, page: usize) {
        self.draw_text(
            content,
            self.margin,
            self.page_h - self.margin + 15.0,
            FontStyle::Bold,
            self.title_font_size,
            title,
        );

        let pg = format!("Page {}", page);
        self.draw_text(
            content,
            self.page_w - self.margin - 60.0,
            self.margin - 35.0,
            FontStyle::Regular,
            self.font_size,
            &pg,
        );
    }

    /// Multipage table with a page title; used by the data export.
    pub fn write_table(&mut self, title: &str, headers: &[&str], rows: &[Vec<String>]) {
        let col_widths = self.compute_col_widths(headers, rows);
        let table_width: f32 = col_widths.iter().sum();
        let header_row: Vec<String> = headers.iter().map(|s| s.to_string()).collect();

        // No rows: one page with only the header, not an empty PDF.
        if rows.is_empty() {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, 1);

            let y = self.page_h - self.margin - 30.0;
            self.fill_row_band(&mut content, y, table_width, (0.85, 0.87, 0.90));
            self.draw_row(
                &mut content,
                y,
                &col_widths,
                self.margin,
                &header_row,
                FontStyle::Bold,
                self.header_font_size,
            );

            self.finalize_page(content);
            return;
        }

        let mut remaining: &[Vec<String>] = rows;
        let mut page_idx = 1;

        while !remaining.is_empty() {
            let mut content = self.new_page();
            self.draw_page_header_footer(&mut content, title, page_idx);

            let mut y = self.page_h - self.margin - 30.0;

            self.fill_row_band(&mut content, y, table_width, (0.85, 0.87, 0.90));
            self.draw_row(
                &mut content,
                y,
                &col_widths,
                self.margin,
                &header_row,
                FontStyle::Bold,
                self.header_font_size,
            );

            y -= self.row_h;

            let mut consumed = 0;

            for (i, row) in remaining.iter().enumerate() {
                if y - self.row_h < self.margin {
                    break;
                }

                // zebra stripe
                if i % 2 == 0 {
                    self.fill_row_band(&mut content, y, table_width, (0.96, 0.96, 0.96));
                }

                self.draw_row(
                    &mut content,
                    y,
                    &col_widths,
                    self.margin,
                    row,
                    FontStyle::Regular,
                    self.font_size,
                );

                y -= self.row_h;
                consumed += 1;
            }

            self.finalize_page(content);
            remaining = &remaining[consumed..];
            page_idx += 1;
        }
    }

    pub fn save(mut self, path: &Path) -> std::io::Result<()> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        self.build_pages_tree();

        let bytes = self.pdf.finish();
        let mut f = File::create(path)?;
        f.write_all(&bytes)?;
        Ok(())
    }
}
