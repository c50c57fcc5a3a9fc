//! Driver-level error type: a small enum of failure categories, each `Display`ed with enough
//! position information to act on without a debugger.

use std::fmt;

use crate::diagnostics::Diagnostic;

#[derive(Debug)]
pub enum DriverError {
    /// The source directory or its `package.json` could not be read.
    Io {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    /// `package.json` did not deserialize into a `source::Package`.
    Deserialize {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },
    /// Translation completed but left diagnostics in the sink.
    Translation(Vec<Diagnostic>),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Io { path, source } => {
                write!(f, "failed to read {}: {source}", path.display())
            }
            DriverError::Deserialize { path, source } => {
                write!(f, "failed to parse {} as a package: {source}", path.display())
            }
            DriverError::Translation(diagnostics) => {
                writeln!(f, "translation failed with {} diagnostic(s):", diagnostics.len())?;
                for (i, diagnostic) in diagnostics.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "  {diagnostic}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DriverError::Io { source, .. } => Some(source),
            DriverError::Deserialize { source, .. } => Some(source),
            DriverError::Translation(_) => None,
        }
    }
}
