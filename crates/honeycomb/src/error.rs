//! Error type shared by diagram validation, simplex construction and generation.
//!
//! All variants are raised before the first vertex is registered; once the
//! expansion starts, reflection and registration cannot fail.

use std::fmt;

#[derive(Clone, Debug, PartialEq)]
pub enum Error {
    /// Malformed diagram (caller error): not square, not symmetric, bad diagonal,
    /// or an off-diagonal order below 2.
    InvalidDiagram { reason: String },
    /// Structurally valid diagram that has no realization with a supported signature.
    DegenerateDiagram { reason: String },
    /// Unusable run configuration (missing growth bound, bad tolerance).
    InvalidConfig { reason: String },
}

impl Error {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidDiagram {
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateDiagram {
            reason: reason.into(),
        }
    }

    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDiagram { reason } => write!(f, "invalid coxeter diagram: {reason}"),
            Self::DegenerateDiagram { reason } => write!(f, "degenerate coxeter diagram: {reason}"),
            Self::InvalidConfig { reason } => write!(f, "invalid generation config: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
