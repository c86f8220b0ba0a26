//! Crate error types
//!
//! Configuration problems are the only conditions surfaced as errors.
//! Lookup misses, name collisions and module-reported failures are normal
//! negative outcomes and are reported through [`Outcome`](crate::Outcome)
//! or booleans instead.

/// Error type for orchestrator configuration handling
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// An origin location does not start with `/`
    #[error("invalid origin location `{location}`: locations must begin with '/'")]
    InvalidOriginLocation {
        /// The offending location string
        location: String,
    },

    /// An origin pass has no scheme
    #[error("origin `{location}` has an empty pass scheme")]
    EmptyOriginScheme {
        /// Location of the offending origin
        location: String,
    },
}

impl Error {
    pub(crate) fn invalid_origin_location(location: impl Into<String>) -> Self {
        Self::InvalidOriginLocation {
            location: location.into(),
        }
    }

    pub(crate) fn empty_origin_scheme(location: impl Into<String>) -> Self {
        Self::EmptyOriginScheme {
            location: location.into(),
        }
    }
}

/// Result alias for orchestrator configuration handling
pub type Result<T> = std::result::Result<T, Error>;
