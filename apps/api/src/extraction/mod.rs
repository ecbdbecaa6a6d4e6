//! Document Extractor — turns an uploaded résumé (PDF or DOCX) into one unstructured string.
//!
//! No layout survives extraction: headings, tables and formatting are flattened
//! into whitespace-separated text runs.

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

pub mod docx;
pub mod pdf;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    #[error("extraction worker failed: {0}")]
    Worker(String),

    #[error("no extractable text")]
    NoText,
}

/// Supported résumé formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
}

impl DocumentKind {
    /// Resolves the format from the declared MIME type.
    ///
    /// Browsers sometimes declare nothing or `application/octet-stream`; only then
    /// is the file extension consulted.
    pub fn detect(content_type: Option<&str>, file_name: Option<&str>) -> Result<Self, ExtractionError> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or_default().trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty());

        match mime.as_deref() {
            Some(PDF_MIME) => Ok(DocumentKind::Pdf),
            Some(DOCX_MIME) => Ok(DocumentKind::Docx),
            None | Some("application/octet-stream") => Self::from_extension(file_name)
                .ok_or_else(|| {
                    ExtractionError::UnsupportedFormat(
                        file_name.unwrap_or("unnamed file").to_string(),
                    )
                }),
            Some(other) => Err(ExtractionError::UnsupportedFormat(other.to_string())),
        }
    }

    fn from_extension(file_name: Option<&str>) -> Option<Self> {
        let extension = std::path::Path::new(file_name?)
            .extension()
            .and_then(|v| v.to_str())
            .map(|v| v.to_ascii_lowercase())?;

        match extension.as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            _ => None,
        }
    }
}

/// An uploaded résumé. Lives only for the duration of one request.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Extracts plain text from a résumé document.
///
/// Parsing runs on the blocking pool; a panic inside a parser library surfaces as
/// `ExtractionError::Worker` instead of taking the process down.
pub async fn extract_text(document: &ResumeDocument) -> Result<String, ExtractionError> {
    let kind = DocumentKind::detect(
        document.content_type.as_deref(),
        document.file_name.as_deref(),
    )?;
    let bytes = document.bytes.clone();

    let text = tokio::task::spawn_blocking(move || match kind {
        DocumentKind::Pdf => pdf::extract(&bytes),
        DocumentKind::Docx => docx::extract(&bytes),
    })
    .await
    .map_err(|e| ExtractionError::Worker(e.to_string()))??;

    if text.trim().is_empty() {
        return Err(ExtractionError::NoText);
    }

    debug!(?kind, chars = text.chars().count(), "Extracted résumé text");
    Ok(text)
}

/// Joins text runs with single spaces, skipping runs that are blank.
pub(crate) fn join_runs<I, S>(runs: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    runs.into_iter()
        .map(|r| r.as_ref().trim().to_string())
        .filter(|r| !r.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
