use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(
        "Workbook not found: {0}\n\
         Pass the file path as an argument or set TASKDASH_FILE."
    )]
    NotFound(PathBuf),

    #[error("Failed to read workbook {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    #[error("Workbook {0} contains no sheets")]
    EmptyWorkbook(PathBuf),
}

pub type Result<T> = std::result::Result<T, LoadError>;
