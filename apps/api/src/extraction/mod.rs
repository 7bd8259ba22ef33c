//! Document Extractor — normalizes uploaded resume files into plain text.
//!
//! Dispatch is strictly on the lowercase filename extension: txt, docx, pdf.
//! Anything else is rejected. No partial text is ever returned on failure.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported resume format: \"{0}\" (expected txt, docx, or pdf)")]
    UnsupportedFormat(String),

    #[error("resume text is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("failed to extract text from {format} resume: {source}")]
    Extraction {
        format: &'static str,
        #[source]
        source: anyhow::Error,
    },
}

/// Extracts plain text from an uploaded resume file.
///
/// - `txt`: strict UTF-8 decode, returned verbatim. Invalid byte sequences are
///   an error, never replaced.
/// - `pdf`: pages in document order, one newline per page, trimmed.
/// - `docx`: paragraphs in document order, one newline per paragraph, trimmed.
pub fn extract_text(file_name: &str, data: &[u8]) -> Result<String, ExtractError> {
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|v| v.to_str())
        .map(|v| v.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "txt" => Ok(String::from_utf8(data.to_vec())?),
        "pdf" => extract_pdf_text(data),
        "docx" => extract_docx_text(data),
        other => Err(ExtractError::UnsupportedFormat(other.to_string())),
    }
}

fn extract_pdf_text(data: &[u8]) -> Result<String, ExtractError> {
    let text = pdf_extract::extract_text_from_mem(data).map_err(|e| ExtractError::Extraction {
        format: "pdf",
        source: e.into(),
    })?;
    Ok(text.trim().to_string())
}

/// Reads `word/document.xml` out of the docx archive and collects the text of
/// each `w:p` paragraph.
fn extract_docx_text(data: &[u8]) -> Result<String, ExtractError> {
    docx_paragraphs(data)
        .map(|paragraphs| paragraphs.join("\n").trim().to_string())
        .map_err(|e| ExtractError::Extraction {
            format: "docx",
            source: e,
        })
}

fn docx_paragraphs(data: &[u8]) -> anyhow::Result<Vec<String>> {
    let mut archive = zip::ZipArchive::new(Cursor::new(data))?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")?
        .read_to_string(&mut xml)?;

    let mut reader = Reader::from_str(&xml);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_paragraph = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:p" => {
                in_paragraph = true;
                current.clear();
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => {
                paragraphs.push(std::mem::take(&mut current));
                in_paragraph = false;
            }
            Ok(Event::Text(e)) if in_paragraph => {
                current.push_str(&e.xml_content()?);
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(err.into()),
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}
