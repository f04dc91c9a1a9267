//! Error type shared by every fallible operation in the crate.

use thiserror::Error as ThisError;

/// Errors raised while validating input or running a search.
///
/// An exhausted neighborhood is *not* an error: it is reported through
/// [`Termination::NeighborhoodExhausted`](crate::tabu::Termination).
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// The cost matrix or instance parameters are malformed.
    #[error("invalid instance: {0}")]
    InvalidInstance(String),
    /// A tour violates the depot-anchored permutation invariant.
    #[error("invalid tour: {0}")]
    InvalidTour(String),
    /// Search configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// Evaluation produced a value that cannot be compared (NaN or infinite).
    #[error("numeric fault: {0}")]
    NumericFault(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_instance(message: impl Into<String>) -> Self {
        Self::InvalidInstance(message.into())
    }

    pub fn invalid_tour(message: impl Into<String>) -> Self {
        Self::InvalidTour(message.into())
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    pub fn numeric_fault(message: impl Into<String>) -> Self {
        Self::NumericFault(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::invalid_instance("size 2 < 3").to_string(),
            "invalid instance: size 2 < 3"
        );
        assert_eq!(
            Error::invalid_tour("node 3 repeated").to_string(),
            "invalid tour: node 3 repeated"
        );
        assert_eq!(
            Error::numeric_fault("cost is NaN").to_string(),
            "numeric fault: cost is NaN"
        );
    }
}
