//! Plain text to PDF handler.

use async_trait::async_trait;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

use super::run_blocking;
use crate::converter::error::ConversionError;
use crate::converter::traits::Handler;
use crate::converter::types::{Category, HandlerJob};

// A4 portrait, Helvetica 12 pt, 10 mm rows.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BOTTOM_MARGIN_MM: f32 = 15.0;
const LINE_HEIGHT_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;

/// Wrap width in characters for the usable line width.
///
/// Helvetica averages roughly half an em per glyph, so 190 mm at 12 pt
/// fits about 88 glyphs.
const WRAP_COLUMNS: usize = 88;

/// Splits text into rows: one paragraph per input line, each wrapped at
/// word boundaries to `width` characters. Empty input lines stay as
/// blank rows.
pub(crate) fn layout_rows(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    for line in text.split('\n') {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if line.trim().is_empty() {
            rows.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in line.split_whitespace() {
            let mut word = word.to_string();
            // Words longer than a row are hard-split.
            while word.chars().count() > width {
                if !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                }
                let split_at = word
                    .char_indices()
                    .nth(width)
                    .map(|(i, _)| i)
                    .unwrap_or(word.len());
                rows.push(word[..split_at].to_string());
                word = word[split_at..].to_string();
            }
            if word.is_empty() {
                continue;
            }
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > width {
                rows.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        if !current.is_empty() {
            rows.push(current);
        }
    }
    rows
}

/// Whether the built-in Helvetica (WinAnsi encoding) has a glyph for `c`.
fn win_ansi_encodable(c: char) -> bool {
    matches!(c, '\t' | '\n' | '\r' | ' '..='~' | '\u{a0}'..='\u{ff}')
        || "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ".contains(c)
}

/// Rejects text the built-in font cannot render, naming the first offender.
fn check_encodable(text: &str, source: &Path) -> Result<(), ConversionError> {
    for (line_no, line) in text.lines().enumerate() {
        if let Some(c) = line.chars().find(|c| !win_ansi_encodable(*c)) {
            return Err(ConversionError::EncodingError {
                path: source.to_path_buf(),
                reason: format!(
                    "character {:?} (U+{:04X}) on line {} is not supported by the PDF font",
                    c,
                    c as u32,
                    line_no + 1
                ),
            });
        }
    }
    Ok(())
}

fn render_pdf(rows: &[String], title: &str, output: &Path) -> Result<usize, ConversionError> {
    let pdf_error = |e: printpdf::Error| ConversionError::conversion_failed(e.to_string(), None);

    let (doc, page, layer) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(pdf_error)?;

    let first_baseline = PAGE_HEIGHT_MM - MARGIN_MM - LINE_HEIGHT_MM / 2.0;
    let mut current_layer = doc.get_page(page).get_layer(layer);
    let mut y = first_baseline;
    let mut pages = 1;

    for row in rows {
        if y < BOTTOM_MARGIN_MM {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            current_layer = doc.get_page(page).get_layer(layer);
            y = first_baseline;
            pages += 1;
        }
        if !row.is_empty() {
            current_layer.use_text(row.as_str(), FONT_SIZE_PT, Mm(MARGIN_MM), Mm(y), &font);
        }
        y -= LINE_HEIGHT_MM;
    }

    let mut writer = BufWriter::new(File::create(output)?);
    doc.save(&mut writer).map_err(pdf_error)?;
    Ok(pages)
}

fn convert_text(source: &Path, output: &Path) -> Result<(), ConversionError> {
    let bytes = std::fs::read(source)?;
    let text = String::from_utf8(bytes).map_err(|e| ConversionError::EncodingError {
        path: source.to_path_buf(),
        reason: e.utf8_error().to_string(),
    })?;

    check_encodable(&text, source)?;

    let rows = layout_rows(&text, WRAP_COLUMNS);
    let title = source
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    let pages = render_pdf(&rows, &title, output)?;
    debug!("Laid out {} rows on {} pages", rows.len(), pages);
    Ok(())
}

/// Lays plain UTF-8 text out as a PDF with a fixed font and margins.
#[derive(Debug, Default, Clone)]
pub struct TextToPdfHandler;

impl TextToPdfHandler {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Handler for TextToPdfHandler {
    fn category(&self) -> Category {
        Category::TextToDocument
    }

    async fn handle(&self, job: &HandlerJob) -> Result<(), ConversionError> {
        if job.target_ext != "pdf" {
            return Err(ConversionError::unsupported(job.target_ext.clone()));
        }
        let job = job.clone();
        run_blocking(move || convert_text(&job.source_path, &job.output_path)).await
    }
}
