use std::path::PathBuf;

use thiserror::Error;

/// Validation failure while constructing block values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlockError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Structural problems in a block catalogue file.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("failed to read catalogue {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("block `{0}` is listed more than once")]
    DuplicateId(String),
    #[error("catalogue contains an empty block id")]
    EmptyId,
    #[error("override for `{0}` names a block that is not in the catalogue")]
    OrphanOverride(String),
}
