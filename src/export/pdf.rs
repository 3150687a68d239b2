//! Minimal tabular PDF writer for locally generated reports.
//!
//! Uses the built-in Helvetica font, so text is limited to the ASCII range;
//! anything else is replaced with `?`.

use pdf_writer::{Content, Name, Pdf, Rect, Ref, Str};

const PAGE_W: f32 = 595.0;
const PAGE_H: f32 = 842.0;
const MARGIN: f32 = 40.0;
const ROW_H: f32 = 18.0;
const BODY_PT: f32 = 8.5;
const HEADER_PT: f32 = 9.5;
const TITLE_PT: f32 = 15.0;
const SUBTITLE_PT: f32 = 9.0;
/// Rough Helvetica advance per character at 1pt.
const CHAR_W: f32 = 0.52;

pub struct PdfManager {
    pdf: Pdf,
    catalog_id: Ref,
    pages_id: Ref,
    font_id: Ref,
    next_id: i32,
    page_refs: Vec<Ref>,
}

impl Default for PdfManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Helvetica without an embedded encoding only covers ASCII.
pub fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

/// Cut `text` so it fits `width` points at `size`, marking the cut with `..`.
pub fn fit_cell(text: &str, width: f32, size: f32) -> String {
    let max_chars = ((width - 6.0) / (size * CHAR_W)).floor().max(1.0) as usize;
    let safe = pdf_safe(text);
    if safe.len() <= max_chars {
        return safe;
    }
    let keep = max_chars.saturating_sub(2);
    format!("{}..", &safe[..keep])
}

impl PdfManager {
    pub fn new() -> Self {
        let mut pdf = Pdf::new();
        let catalog_id = Ref::new(1);
        let pages_id = Ref::new(2);
        let font_id = Ref::new(3);
        pdf.type1_font(font_id).base_font(Name(b"Helvetica"));

        Self {
            pdf,
            catalog_id,
            pages_id,
            font_id,
            next_id: 4,
            page_refs: Vec::new(),
        }
    }

    fn fresh_ref(&mut self) -> Ref {
        let id = self.next_id;
        self.next_id += 1;
        Ref::new(id)
    }

    pub fn page_count(&self) -> usize {
        self.page_refs.len()
    }

    fn add_page(&mut self, content: Content) {
        let page_id = self.fresh_ref();
        let content_id = self.fresh_ref();
        self.page_refs.push(page_id);

        {
            let mut page = self.pdf.page(page_id);
            page.parent(self.pages_id)
                .media_box(Rect::new(0.0, 0.0, PAGE_W, PAGE_H))
                .contents(content_id);
            page.resources().fonts().pair(Name(b"F1"), self.font_id);
        }

        self.pdf.stream(content_id, &content.finish());
    }

    fn text(content: &mut Content, x: f32, y: f32, size: f32, text: &str) {
        content.begin_text();
        content.set_font(Name(b"F1"), size);
        content.set_text_matrix([1.0, 0.0, 0.0, 1.0, x, y]);
        content.show(Str(pdf_safe(text).as_bytes()));
        content.end_text();
    }

    fn band(content: &mut Content, y: f32, width: f32, gray: f32) {
        content.save_state();
        content.set_fill_rgb(gray, gray, gray);
        content.rect(MARGIN, y, width, ROW_H);
        content.fill_nonzero();
        content.restore_state();
    }

    fn row(content: &mut Content, y: f32, widths: &[f32], cells: &[String], size: f32) {
        let mut x = MARGIN;
        for (w, cell) in widths.iter().zip(cells) {
            Self::text(content, x + 3.0, y + 5.0, size, &fit_cell(cell, *w, size));
            content.save_state();
            content.set_stroke_rgb(0.7, 0.7, 0.7);
            content.rect(x, y, *w, ROW_H);
            content.stroke();
            content.restore_state();
            x += w;
        }
    }

    /// Column widths proportional to the longest cell, scaled to the page.
    fn col_widths(headers: &[&str], rows: &[Vec<String>]) -> Vec<f32> {
        let mut chars: Vec<usize> = headers.iter().map(|h| h.len().max(4)).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(chars.len()) {
                chars[i] = chars[i].max(cell.chars().count().min(40));
            }
        }
        let total: usize = chars.iter().sum::<usize>().max(1);
        let avail = PAGE_W - 2.0 * MARGIN;
        chars
            .iter()
            .map(|c| avail * *c as f32 / total as f32)
            .collect()
    }

    /// Lay `rows` out on as many pages as needed. Every page repeats the
    /// title and the header row. An empty table still yields one page.
    pub fn write_table(
        &mut self,
        title: &str,
        subtitle: &str,
        headers: &[&str],
        rows: &[Vec<String>],
    ) {
        let widths = Self::col_widths(headers, rows);
        let table_w: f32 = widths.iter().sum();
        let header_cells: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

        let mut remaining = rows;
        let mut page_no = 1;

        loop {
            let mut content = Content::new();
            Self::text(&mut content, MARGIN, PAGE_H - MARGIN, TITLE_PT, title);
            if !subtitle.is_empty() {
                Self::text(&mut content, MARGIN, PAGE_H - MARGIN - 16.0, SUBTITLE_PT, subtitle);
            }
            Self::text(
                &mut content,
                PAGE_W - MARGIN - 40.0,
                MARGIN - 20.0,
                SUBTITLE_PT,
                &format!("Page {page_no}"),
            );

            let mut y = PAGE_H - MARGIN - 44.0;
            Self::band(&mut content, y, table_w, 0.85);
            Self::row(&mut content, y, &widths, &header_cells, HEADER_PT);
            y -= ROW_H;

            let mut used = 0;
            for (i, row) in remaining.iter().enumerate() {
                if y < MARGIN {
                    break;
                }
                if i % 2 == 1 {
                    Self::band(&mut content, y, table_w, 0.95);
                }
                Self::row(&mut content, y, &widths, row, BODY_PT);
                y -= ROW_H;
                used += 1;
            }

            self.add_page(content);
            remaining = &remaining[used..];
            page_no += 1;

            if remaining.is_empty() {
                break;
            }
        }
    }

    /// Serialize the document.
    pub fn finish(mut self) -> Vec<u8> {
        self.pdf.catalog(self.catalog_id).pages(self.pages_id);
        let count = self.page_refs.len() as i32;
        self.pdf
            .pages(self.pages_id)
            .count(count)
            .kids(self.page_refs.iter().copied());
        self.pdf.finish()
    }
}
