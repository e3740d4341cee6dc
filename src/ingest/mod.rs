//! Line ingestion: the "text ingester" external collaborator (spec §1),
//! supplemented from `ocr_files.py`/`reading_order.py` in the original
//! implementation this engine was distilled from. Reads ALTO XML, PAGE XML,
//! or plain text, and produces the ordered line sequence the matching core
//! expects.

pub mod alto;
pub mod page;
pub mod reading_order;

use std::fs;
use std::path::Path;

pub use reading_order::ReadingOrderStrategy;

use crate::error::IngestError;

/// Options steering PAGE ingestion; ignored for ALTO and plain-text input.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub reading_order: ReadingOrderStrategy,
    pub grid_size: usize,
}

impl Default for IngestOptions {
    fn default() -> IngestOptions {
        IngestOptions { reading_order: ReadingOrderStrategy::ReadingOrder, grid_size: 10 }
    }
}

/// Reads `path` and ingests it into an ordered sequence of lines, trying
/// ALTO, then PAGE, then falling back to plain text (spec §4.9).
pub fn ingest(path: &Path, opts: &IngestOptions) -> Result<Vec<String>, IngestError> {
    let content = fs::read_to_string(path)
        .map_err(|source| IngestError::Io { path: path.to_path_buf(), source })?;
    ingest_str(&content, opts)
}

/// Same as [`ingest`] but operating on an in-memory string, useful for tests
/// and for callers that already have file contents in hand.
pub fn ingest_str(content: &str, opts: &IngestOptions) -> Result<Vec<String>, IngestError> {
    match roxmltree::Document::parse(content) {
        Ok(doc) => {
            let root_name = doc.root_element().tag_name().name();
            if root_name == "alto" {
                log::debug!("ingesting {root_name:?} document as ALTO");
                Ok(alto::extract_lines(&doc))
            } else if root_name == "PcGts" {
                log::debug!("ingesting {root_name:?} document as PAGE");
                page::extract_lines(&doc, opts)
            } else {
                log::debug!("XML root {root_name:?} is neither alto nor PcGts; using plain text");
                Ok(plain_text(content))
            }
        }
        Err(_) => {
            log::debug!("not well-formed XML; falling back to plain text");
            Ok(plain_text(content))
        }
    }
}

fn plain_text(content: &str) -> Vec<String> {
    content.lines().filter(|line| !line.is_empty()).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_file_is_split_on_newlines() {
        let lines = ingest_str("first\nsecond\n", &IngestOptions::default()).unwrap();
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn plain_text_drops_blank_lines() {
        let lines = ingest_str("first\n\nsecond\n\n", &IngestOptions::default()).unwrap();
        assert_eq!(lines, vec!["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn malformed_xml_falls_back_to_plain_text() {
        let lines = ingest_str("<not ok", &IngestOptions::default()).unwrap();
        assert_eq!(lines, vec!["<not ok".to_string()]);
    }

    #[test]
    fn unrelated_xml_root_falls_back_to_plain_text() {
        let lines = ingest_str("<root><child/></root>", &IngestOptions::default()).unwrap();
        assert_eq!(lines, vec!["<root><child/></root>".to_string()]);
    }
}
