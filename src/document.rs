//! Agent documentation loading.
//!
//! Plain-text, markdown and PDF files. Text files are decoded as UTF-8 with a
//! Latin-1 fallback; PDFs go through lopdf page by page. Content is capped
//! before it is handed to the analyzer.

use std::fs;
use std::path::Path;

use lopdf::Document;
use serde::Serialize;
use tracing::{debug, warn};

use crate::constants::document::{PDF_EXTENSION, PREVIEW_CHARS, TEXT_EXTENSIONS};
use crate::types::{Result, TowerError, truncate_chars};

#[derive(Debug, Clone, Serialize)]
pub struct DocumentMetadata {
    pub file_name: String,
    pub extension: String,
    pub size_bytes: u64,
    pub word_count: usize,
    pub char_count: usize,
    pub preview: String,
    /// Content was cut to the configured maximum
    pub truncated: bool,
}

#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub content: String,
    pub metadata: DocumentMetadata,
}

/// Read a document, keeping at most `max_chars` characters of content
pub fn load(path: &Path, max_chars: usize) -> Result<LoadedDocument> {
    let path_label = path.display().to_string();

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    let is_pdf = extension == PDF_EXTENSION;
    if !is_pdf && !TEXT_EXTENSIONS.contains(&extension.as_str()) {
        return Err(TowerError::UnsupportedFormat { extension });
    }

    if !path.is_file() {
        return Err(TowerError::document(path_label, "file not found"));
    }

    let bytes = fs::read(path).map_err(|e| TowerError::document(&path_label, e.to_string()))?;
    let size_bytes = bytes.len() as u64;
    let text = if is_pdf {
        extract_pdf_text(&bytes, &path_label)?
    } else {
        decode(bytes, &path_label)
    };

    if text.trim().is_empty() {
        return Err(TowerError::document(path_label, "document is empty"));
    }

    let char_count = text.chars().count();
    let truncated = char_count > max_chars;
    let content = if truncated {
        warn!(
            "{} has {} characters, analyzing the first {}",
            path_label, char_count, max_chars
        );
        truncate_chars(&text, max_chars).to_string()
    } else {
        text
    };

    let metadata = DocumentMetadata {
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        extension,
        size_bytes,
        word_count: content.split_whitespace().count(),
        char_count,
        preview: preview(&content),
        truncated,
    };

    debug!(
        words = metadata.word_count,
        chars = metadata.char_count,
        "Loaded document {}",
        metadata.file_name
    );

    Ok(LoadedDocument { content, metadata })
}

/// UTF-8, or Latin-1 when the bytes are not valid UTF-8
fn decode(bytes: Vec<u8>, path_label: &str) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text.trim_start_matches('\u{feff}').to_string(),
        Err(e) => {
            debug!("{} is not UTF-8, decoding as Latin-1", path_label);
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// Text of every page in page order, blank pages skipped
fn extract_pdf_text(bytes: &[u8], path_label: &str) -> Result<String> {
    let pdf = Document::load_mem(bytes)
        .map_err(|e| TowerError::document(path_label, format!("failed to load PDF: {}", e)))?;

    let pages = pdf.get_pages();
    let mut texts = Vec::with_capacity(pages.len());
    for page_number in pages.keys() {
        match pdf.extract_text(&[*page_number]) {
            Ok(text) if !text.trim().is_empty() => texts.push(text.trim().to_string()),
            Ok(_) => {}
            Err(e) => warn!("{} page {}: no extractable text ({})", path_label, page_number, e),
        }
    }

    if texts.is_empty() {
        return Err(TowerError::document(
            path_label,
            "no text content found in PDF, it may be scanned",
        ));
    }

    debug!(pages = pages.len(), "Extracted text from {}", path_label);
    Ok(texts.join("\n\n"))
}

fn preview(content: &str) -> String {
    let head = truncate_chars(content, PREVIEW_CHARS);
    if head.len() < content.len() {
        format!("{}...", head)
    } else {
        head.to_string()
    }
}
