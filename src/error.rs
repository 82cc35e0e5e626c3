//! # Error Types
//!
//! This module defines all error types for the fretwork engine.
//!
//! Errors fall into two groups:
//! - **Configuration errors** (`InvalidFormula`, `AmbiguousSpelling`, `FormulaDefinition`,
//!   `InvalidTuning`, `ConfigError`) come from bad formula or tuning data. They surface when a
//!   library is loaded, so a broken data file fails at startup.
//! - **Per-call errors** (`UnsupportedStringSetSize`, `UnrealizableVoicing`, `InvalidStringSet`)
//!   depend on the combination a caller asked for. A UI should show "no diagram" for these.
//!
//! ## Usage
//! ```rust
//! use fretwork::{Fretboard, FretError, StringSet};
//!
//! let board = Fretboard::standard()?;
//! match board.voicings("C", "dominant-7", StringSet::new(3, 3)) {
//!     Ok(voicings) => println!("{} voicings", voicings.len()),
//!     Err(e) if e.is_recoverable() => println!("no diagram: {}", e),
//!     Err(e) => return Err(e),
//! }
//! # Ok::<(), FretError>(())
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FretError {
    /// Unknown formula identifier, or a role that the formula does not contain.
    ///
    /// # Example
    /// ```
    /// # use fretwork::FretError;
    /// let err = FretError::InvalidFormula("major-tried".to_string());
    /// assert_eq!(err.to_string(), "Invalid formula: major-tried");
    /// ```
    #[error("Invalid formula: {0}")]
    InvalidFormula(String),

    /// The string set has fewer strings than the number of roles being voiced.
    ///
    /// # Example
    /// ```
    /// # use fretwork::FretError;
    /// let err = FretError::UnsupportedStringSetSize { strings: 3, roles: 4 };
    /// assert_eq!(err.to_string(), "Cannot voice 4 roles on 3 strings");
    /// ```
    #[error("Cannot voice {roles} roles on {strings} strings")]
    UnsupportedStringSetSize { strings: usize, roles: usize },

    /// No octave placement keeps the voicing inside the playable fret range.
    #[error("Unrealizable voicing: {0}")]
    UnrealizableVoicing(String),

    /// A formula uses a role that has no registered spelling policy.
    ///
    /// # Example
    /// ```
    /// # use fretwork::FretError;
    /// let err = FretError::AmbiguousSpelling {
    ///     formula: "odd-scale".to_string(),
    ///     role: "#6".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Ambiguous spelling in 'odd-scale': role #6 has no spelling policy");
    /// ```
    #[error("Ambiguous spelling in '{formula}': role {role} has no spelling policy")]
    AmbiguousSpelling { formula: String, role: String },

    /// A formula definition breaks a structural rule (offset order, octave span, duplicates).
    #[error("Invalid definition of '{formula}': {message}")]
    FormulaDefinition { formula: String, message: String },

    #[error("Invalid note: {0}")]
    InvalidNote(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),

    #[error("Invalid string set: {0}")]
    InvalidStringSet(String),

    /// Unreadable or malformed YAML configuration.
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Serialization failed: {0}")]
    SerializationError(String),
}

impl FretError {
    /// True for errors caused by the requested combination rather than by bad data.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FretError::UnsupportedStringSetSize { .. }
                | FretError::UnrealizableVoicing(_)
                | FretError::InvalidStringSet(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_split() {
        assert!(FretError::UnrealizableVoicing("x".into()).is_recoverable());
        assert!(FretError::UnsupportedStringSetSize { strings: 2, roles: 3 }.is_recoverable());
        assert!(!FretError::InvalidFormula("x".into()).is_recoverable());
        assert!(!FretError::AmbiguousSpelling {
            formula: "f".into(),
            role: "b3".into()
        }
        .is_recoverable());
    }
}
