use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    #[error("Invalid DPI: {0} (must be greater than zero)")]
    InvalidDpi(u16),

    #[error("Render error for {}: {message}", file.display())]
    Render { file: PathBuf, message: String },

    #[error("Cannot write image {}: {message}", path.display())]
    ImageWrite { path: PathBuf, message: String },

    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
