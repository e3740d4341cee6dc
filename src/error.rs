//! Typed errors for the ambient ingestion/reading-order stack.
//!
//! The matching core itself is total (spec §7); only the filesystem- and
//! XML-facing code below it can fail.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed {schema} document: {detail}")]
    Xml { schema: &'static str, detail: String },

    #[error("unknown reading-order strategy {0:?}")]
    UnknownStrategy(String),
}
