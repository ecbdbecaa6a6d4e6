use super::{join_runs, ExtractionError};

/// Extracts text page by page and joins the non-empty pages with spaces.
pub fn extract(data: &[u8]) -> Result<String, ExtractionError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| ExtractionError::Pdf(e.to_string()))?;
    Ok(join_runs(pages))
}
