//! Loading attachment files sent alongside a complaint

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AttachmentError {
    #[error("cannot read attachment {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("attachment {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Read each path as a JSON document, preserving order
pub fn load_attachments<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Value>, AttachmentError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            let content = fs::read_to_string(path).map_err(|source| AttachmentError::Read {
                path: path.to_path_buf(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| AttachmentError::Parse {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect()
}
