//! Raw metadata parsing

use thiserror::Error;

pub mod webui;

/// Condition that stops a single file from being rendered
#[derive(Debug, Error, PartialEq)]
pub enum MetadataError {
    /// `parameters` field is absent or blank after extraction
    #[error("no generation metadata found")]
    MissingMetadata,
}
