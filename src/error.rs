use std::fmt;

use thiserror::Error;

use crate::json::ValidationError;
use crate::lexer::ParseError;

/// Flat classification of [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    Base64,
    Glb,
    Io,
    Uri,
    MissingBlob,
    Parse,
}

/// One structured problem found while reading a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub message: String,
}

impl ErrorRecord {
    pub fn glb(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Glb,
            message: message.into(),
        }
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items
        .iter()
        .map(|item| item.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("document failed validation: {}", join(.0))]
    Validation(Vec<ValidationError>),

    #[error("malformed GLB: {}", join(.0))]
    Glb(Vec<ErrorRecord>),

    #[error("invalid base64 data: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("invalid glTF JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported or unresolvable URI: {0}")]
    Uri(String),

    #[error("the GLB binary chunk is referenced but missing")]
    MissingBlob,

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Glb(_) => ErrorKind::Glb,
            Error::Base64(_) => ErrorKind::Base64,
            Error::Json(_) => ErrorKind::Parse,
            Error::Io(_) => ErrorKind::Io,
            Error::Uri(_) => ErrorKind::Uri,
            Error::MissingBlob => ErrorKind::MissingBlob,
            Error::Parse(_) => ErrorKind::Parse,
        }
    }

    pub(crate) fn glb(message: impl Into<String>) -> Self {
        Error::Glb(vec![ErrorRecord::glb(message)])
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::ValidationErrorKind;

    #[test]
    fn messages_join_records() {
        let err = Error::Glb(vec![ErrorRecord::glb("bad magic"), ErrorRecord::glb("bad version")]);
        assert_eq!(err.to_string(), "malformed GLB: bad magic; bad version");
        assert_eq!(err.kind(), ErrorKind::Glb);

        let err = Error::Validation(vec![ValidationError {
            kind: ValidationErrorKind::IndexOutOfBounds,
            path: "node_2_mesh".to_string(),
        }]);
        assert_eq!(err.to_string(), "document failed validation: IndexOutOfBounds: node_2_mesh");
    }
}
