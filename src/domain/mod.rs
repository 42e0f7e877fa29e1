//! Domain layer: record types and the enrollment collection
//!
//! This layer is independent of external concerns (no I/O, no console, no config loading).

pub mod entities;
pub mod error;
pub mod roster;

pub use entities::{Enrollment, Named, PersonName};
pub use error::DomainError;
pub use roster::Roster;

/// Expand `~` and `$VAR` in a path-like string, leaving it unchanged on failure.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
