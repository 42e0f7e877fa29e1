//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent record validation failures.
/// These are independent of file or console concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("The first name should not contain numbers or be blank.")]
    InvalidFirstName(String),

    #[error("The last name should not contain numbers or be blank.")]
    InvalidLastName(String),

    #[error("The course name should not be blank.")]
    BlankCourse,
}
