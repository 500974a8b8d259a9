//! PDF rendering for the admin review export.
//!
//! Produces a single-page A4 document with the review header (movie,
//! author, kind, status, date) followed by the wrapped review text, all
//! set in the builtin Helvetica face so no font files ship with the
//! binary.

use kinoteka_db::models::review::ReviewWithNames;
use printpdf::{BuiltinFont, Mm, PdfDocument};

use crate::error::{AppError, AppResult};

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const TITLE_PT: f32 = 16.0;
const BODY_PT: f32 = 11.0;
const LINE_HEIGHT_MM: f32 = 6.0;
/// Helvetica at 11pt fits roughly this many characters across the text
/// block.
const WRAP_COLUMNS: usize = 90;

/// Render a moderated review as a downloadable PDF.
pub fn render_review(review: &ReviewWithNames) -> AppResult<Vec<u8>> {
    let (doc, page, layer) = PdfDocument::new(
        format!("Review #{}", review.id),
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::InternalError(format!("PDF font error: {e}")))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::InternalError(format!("PDF font error: {e}")))?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    layer.use_text(&review.title, TITLE_PT, Mm(MARGIN_MM), Mm(y), &bold);
    y -= LINE_HEIGHT_MM * 2.0;

    let header_lines = [
        format!("Movie: {}", review.movie_title),
        format!("Author: {}", review.username),
        format!("Kind: {}", review.kind),
        format!("Status: {}", review.status),
        format!("Created: {}", review.created_at.format("%Y-%m-%d %H:%M UTC")),
    ];
    for line in &header_lines {
        layer.use_text(line, BODY_PT, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_HEIGHT_MM;
    }
    y -= LINE_HEIGHT_MM;

    for line in wrap_text(&review.text, WRAP_COLUMNS) {
        if y < MARGIN_MM {
            break; // review text is capped at 2000 chars, one page suffices
        }
        layer.use_text(&line, BODY_PT, Mm(MARGIN_MM), Mm(y), &font);
        y -= LINE_HEIGHT_MM;
    }

    doc.save_to_bytes()
        .map_err(|e| AppError::InternalError(format!("PDF serialization error: {e}")))
}

/// Suggested download filename: `review_<username>_<movie>.pdf`.
pub fn review_filename(review: &ReviewWithNames) -> String {
    format!("review_{}_{}.pdf", review.username, review.movie_title)
}

/// Greedy word wrap on whitespace; overlong words are kept whole.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
            } else if current.chars().count() + 1 + word.chars().count() <= columns {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    lines
}
