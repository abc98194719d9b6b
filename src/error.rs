use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FixError>;

/// Fatal conditions of a fixer run.
///
/// Malformed mesh lines are never reported here; they are classified as
/// opaque and passed through.
#[derive(Error, Debug)]
pub enum FixError {
    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no vertex lines found in '{}'", .path.display())]
    NoVertices { path: PathBuf },

    #[error("asset directory for '{asset}' not found: '{}'", .path.display())]
    MissingAssetDir { asset: String, path: PathBuf },

    #[error("invalid config '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("unknown asset '{name}'")]
    UnknownAsset { name: String },

    #[error("asset '{asset}' failed: {source}")]
    Asset {
        asset: String,
        #[source]
        source: Box<FixError>,
    },
}

impl FixError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FixError::Io {
            path: path.into(),
            source,
        }
    }

    /// Strips the `Asset` wrapper, if any.
    pub fn root_cause(&self) -> &FixError {
        match self {
            FixError::Asset { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
