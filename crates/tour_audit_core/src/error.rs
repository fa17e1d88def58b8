use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Input {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to append to audit trail {}: {source}", path.display())]
    Audit {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn input(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Input {
            path: path.into(),
            source,
        }
    }

    pub fn audit(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Audit {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidData(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }

    /// True for failures caused by the files or arguments handed to the run,
    /// as opposed to audit-trail or internal failures.
    pub fn is_input_failure(&self) -> bool {
        matches!(self, Self::Input { .. } | Self::InvalidInput(_))
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::Error;

    #[test]
    fn input_error_names_the_path() {
        let err = Error::input(
            "data/berlin52.tsp",
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(
            err.to_string(),
            "failed to read data/berlin52.tsp: no such file"
        );
        assert!(err.is_input_failure());
    }

    #[test]
    fn audit_error_is_not_an_input_failure() {
        let err = Error::audit(
            "results/audit_validations.txt",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("audit trail"));
        assert!(!err.is_input_failure());
    }
}
