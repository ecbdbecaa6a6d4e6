use std::io::{Cursor, Read};

use anyhow::bail;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{join_runs, ExtractionError};

const DOCUMENT_PART: &str = "word/document.xml";
/// Cap on the inflated size of `word/document.xml`.
const MAX_DOCUMENT_XML_BYTES: u64 = 32 * 1024 * 1024;

/// Extracts paragraph text from a DOCX archive, paragraphs joined with spaces.
pub fn extract(data: &[u8]) -> Result<String, ExtractionError> {
    let xml = read_document_part(data, MAX_DOCUMENT_XML_BYTES)
        .map_err(|e| ExtractionError::Docx(e.to_string()))?;
    let paragraphs = paragraphs(&xml).map_err(|e| ExtractionError::Docx(e.to_string()))?;
    Ok(join_runs(paragraphs))
}

fn read_document_part(data: &[u8], limit: u64) -> anyhow::Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let document_file = archive.by_name(DOCUMENT_PART)?;

    // The declared size can lie; the read itself is bounded too.
    if document_file.size() > limit {
        bail!("{DOCUMENT_PART} exceeds {limit} bytes uncompressed");
    }
    let mut raw = Vec::new();
    document_file.take(limit + 1).read_to_end(&mut raw)?;
    if raw.len() as u64 > limit {
        bail!("{DOCUMENT_PART} exceeds {limit} bytes uncompressed");
    }

    Ok(String::from_utf8(raw)?)
}

/// Walks `w:p` elements and collects the `w:t` runs inside each one.
///
/// A paragraph nested in another (text boxes) closes the outer text seen so far,
/// so document order is kept.
fn paragraphs(xml: &str) -> anyhow::Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    let mut current = String::new();
    let mut paragraphs = Vec::new();
    let mut depth = 0usize;
    let mut in_text_run = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"w:p" => {
                    if depth > 0 {
                        paragraphs.push(std::mem::take(&mut current));
                    }
                    depth += 1;
                }
                b"w:t" => in_text_run = true,
                _ => {}
            },
            Ok(Event::Empty(e)) => {
                if matches!(e.name().as_ref(), b"w:tab" | b"w:br" | b"w:cr") {
                    current.push(' ');
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:p" => {
                    paragraphs.push(std::mem::take(&mut current));
                    depth = depth.saturating_sub(1);
                }
                b"w:t" => in_text_run = false,
                _ => {}
            },
            Ok(Event::Text(e)) => {
                if in_text_run {
                    current.push_str(&e.xml_content()?);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                if in_text_run {
                    if let Some(ch) = e.resolve_char_ref()? {
                        current.push(ch);
                    } else {
                        let name = e.decode()?;
                        match resolve_predefined_entity(&name) {
                            Some(value) => current.push_str(value),
                            // Unknown entities are kept verbatim.
                            None => {
                                current.push('&');
                                current.push_str(&name);
                                current.push(';');
                            }
                        }
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }

        buf.clear();
    }

    Ok(paragraphs)
}
