use crate::model::Namespace;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse classification of a [`BrowscapError`], used by callers that only
/// care about which class of input problem stopped the build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Io,
    Format,
    Encoding,
    DuplicateKey,
    Structural,
    NotFound,
}

#[derive(Error, Debug)]
pub enum BrowscapError {
    #[error("Directory \"{}\" does not exist.", .0.display())]
    MissingDirectory(PathBuf),

    #[error("File \"{}\" does not exist.", .0.display())]
    MissingFile(PathBuf),

    #[error("IO error on \"{}\": {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory \"{}\" was empty.", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("File \"{}\" was empty.", .0.display())]
    EmptyFile(PathBuf),

    #[error("File \"{}\" had invalid JSON.", path.display())]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("File \"{}\" contains Non-ASCII-Characters.", .0.display())]
    NonAscii(PathBuf),

    #[error("it was tried to add {namespace} \"{key}\", but this was already added before")]
    Duplicate { namespace: Namespace, key: String },

    #[error("{namespace} \"{key}\" not found")]
    NotFound { namespace: Namespace, key: String },

    #[error("Structure error: {0}")]
    Structure(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BrowscapError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BrowscapError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BrowscapError::MissingDirectory(_)
            | BrowscapError::MissingFile(_)
            | BrowscapError::Io { .. } => ErrorKind::Io,
            BrowscapError::EmptyDirectory(_)
            | BrowscapError::EmptyFile(_)
            | BrowscapError::InvalidJson { .. }
            | BrowscapError::Serialization(_) => ErrorKind::Format,
            BrowscapError::NonAscii(_) => ErrorKind::Encoding,
            BrowscapError::Duplicate { .. } => ErrorKind::DuplicateKey,
            BrowscapError::NotFound { .. } => ErrorKind::NotFound,
            BrowscapError::Structure(_) => ErrorKind::Structural,
        }
    }
}

pub type Result<T> = std::result::Result<T, BrowscapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_message_names_namespace_and_key() {
        let err = BrowscapError::Duplicate {
            namespace: Namespace::Device,
            key: "unknown".into(),
        };
        assert_eq!(
            err.to_string(),
            "it was tried to add device \"unknown\", but this was already added before"
        );
        assert_eq!(err.kind(), ErrorKind::DuplicateKey);
    }

    #[test]
    fn test_missing_directory_message() {
        let err = BrowscapError::MissingDirectory(PathBuf::from("./platforms"));
        assert_eq!(err.to_string(), "Directory \"./platforms\" does not exist.");
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
