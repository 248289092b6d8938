//! Error types for the example-data crate.
//!
//! Population generation itself is infallible once a [`crate::PopulationSpec`]
//! exists; these errors guard construction of that spec, following the
//! project's error handling conventions with `thiserror`.

use thiserror::Error;

/// Errors raised while describing a population to generate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// The requested rating band is empty.
    #[error("rating floor {floor} exceeds rating ceiling {ceiling}")]
    InvalidRatingRange {
        /// Lowest rating requested.
        floor: i64,
        /// Highest rating requested.
        ceiling: i64,
    },

    /// The requested population exceeds the generator's safety limit.
    #[error("requested {requested} players but at most {max} can be generated")]
    TooManyPlayers {
        /// Number of players requested.
        requested: usize,
        /// Largest population the generator accepts.
        max: usize,
    },
}
