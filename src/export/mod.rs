//! Report exporters
//!
//! Renders synthesized report text into portable formats. Both
//! exporters share a small Markdown line classifier: the PDF path
//! flattens everything to Latin-1 Helvetica, while DOCX keeps Unicode
//! and turns `**bold**` spans into real bold runs.

mod docx;
mod markdown;
mod pdf;

use thiserror::Error;

pub use docx::render_docx;
pub use pdf::render_pdf;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("DOCX packaging failed: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
