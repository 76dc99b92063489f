//! Error types for the bundle manifest generator.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// XML document errors
#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Malformed(String),

    #[error("invalid element or attribute name: {0:?}")]
    InvalidName(String),
}

/// Run-level errors
///
/// Every stage aborts the run on its own first error; there are no
/// retries. Per-file digest failures inside a collection are governed by
/// an explicit policy instead (see `bundle::HashErrorPolicy`).
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("usage: {0}")]
    Usage(String),

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no proxy descriptor found in {}", .0.display())]
    DescriptorNotFound(PathBuf),

    #[error("XML error: {0}")]
    Xml(#[from] XmlError),
}

impl BundleError {
    /// Wrap an I/O error with the path it occurred at.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        BundleError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Process exit status for this error: 2 for usage errors, 1 for
    /// everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            BundleError::Usage(_) => 2,
            _ => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_usage_error_exit_code() {
        let e = BundleError::Usage("bad flag".to_string());
        assert_eq!(e.exit_code(), 2);
    }

    #[test]
    fn test_run_error_exit_codes() {
        let io_err = BundleError::io("some/path", io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert_eq!(io_err.exit_code(), 1);

        let not_found = BundleError::DescriptorNotFound(PathBuf::from("bundle"));
        assert_eq!(not_found.exit_code(), 1);

        let xml = BundleError::from(XmlError::Malformed("oops".to_string()));
        assert_eq!(xml.exit_code(), 1);
    }

    #[test]
    fn test_io_error_display_includes_path() {
        let e = BundleError::io(
            "bundle/policies",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        let message = e.to_string();
        assert!(message.contains("bundle/policies"));
        assert!(message.contains("no such directory"));
    }
}
