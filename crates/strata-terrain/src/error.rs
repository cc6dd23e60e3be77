use std::path::PathBuf;

use strata_blocks::BlockError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("failed to read recipe book {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse recipe book: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("recipe `{0}` has no rows")]
    NoRows(String),
    #[error("recipe `{recipe}` row {row}: {source}")]
    InvalidBlock {
        recipe: String,
        row: usize,
        #[source]
        source: BlockError,
    },
    #[error("recipe id `{0}` is defined more than once")]
    DuplicateId(String),
}
