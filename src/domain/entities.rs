//! Domain entities: validated record types

use std::fmt;

use crate::domain::error::DomainError;

/// Capability shared by every record that carries a person's name.
pub trait Named {
    /// First name in title case.
    fn first_name(&self) -> &str;

    /// Last name in title case.
    fn last_name(&self) -> &str;

    /// "First Last", as used in confirmations.
    fn full_name(&self) -> String {
        format!("{} {}", self.first_name(), self.last_name())
    }
}

/// A person's first and last name.
///
/// Both parts are non-empty and purely alphabetic. They are stored already
/// title-cased, and title-casing a stored name leaves it unchanged, so a name
/// read back from disk compares equal to the one that was typed in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonName {
    first: String,
    last: String,
}

impl PersonName {
    pub fn new(first: &str, last: &str) -> Result<Self, DomainError> {
        let first = normalize_name(first)
            .ok_or_else(|| DomainError::InvalidFirstName(first.to_string()))?;
        let last =
            normalize_name(last).ok_or_else(|| DomainError::InvalidLastName(last.to_string()))?;
        Ok(Self { first, last })
    }

    /// Replace the first name. On failure the current value is kept.
    pub fn set_first_name(&mut self, value: &str) -> Result<(), DomainError> {
        self.first =
            normalize_name(value).ok_or_else(|| DomainError::InvalidFirstName(value.to_string()))?;
        Ok(())
    }

    /// Replace the last name. On failure the current value is kept.
    pub fn set_last_name(&mut self, value: &str) -> Result<(), DomainError> {
        self.last =
            normalize_name(value).ok_or_else(|| DomainError::InvalidLastName(value.to_string()))?;
        Ok(())
    }
}

impl Named for PersonName {
    fn first_name(&self) -> &str {
        &self.first
    }

    fn last_name(&self) -> &str {
        &self.last
    }
}

impl fmt::Display for PersonName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.first, self.last)
    }
}

/// A student enrolled in a course.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Enrollment {
    name: PersonName,
    course: String,
}

impl Enrollment {
    pub fn new(first: &str, last: &str, course: &str) -> Result<Self, DomainError> {
        let name = PersonName::new(first, last)?;
        Self::for_person(name, course)
    }

    /// Enroll an already validated person.
    pub fn for_person(name: PersonName, course: &str) -> Result<Self, DomainError> {
        let course = validate_course(course)?;
        Ok(Self { name, course })
    }

    pub fn name(&self) -> &PersonName {
        &self.name
    }

    /// Course label, verbatim as entered.
    pub fn course(&self) -> &str {
        &self.course
    }

    pub fn set_first_name(&mut self, value: &str) -> Result<(), DomainError> {
        self.name.set_first_name(value)
    }

    pub fn set_last_name(&mut self, value: &str) -> Result<(), DomainError> {
        self.name.set_last_name(value)
    }

    pub fn set_course(&mut self, value: &str) -> Result<(), DomainError> {
        self.course = validate_course(value)?;
        Ok(())
    }
}

impl Named for Enrollment {
    fn first_name(&self) -> &str {
        self.name.first_name()
    }

    fn last_name(&self) -> &str {
        self.name.last_name()
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.name, self.course)
    }
}

/// Validate a name part and return it title-cased.
///
/// Returns `None` for empty input or any non-alphabetic character
/// (whitespace and digits included).
fn normalize_name(value: &str) -> Option<String> {
    if value.is_empty() || !value.chars().all(char::is_alphabetic) {
        return None;
    }
    let titled = title_case(value);
    // Case mapping may introduce combining marks; such a name could not be read back
    titled.chars().all(char::is_alphabetic).then_some(titled)
}

/// Upper-case the first character, lower-case the rest.
///
/// When the upper-case form of the first character is several characters
/// (`ß` gives `SS`), only the first stays upper case, so `ßa` becomes `Ssa`.
/// Applying it twice gives the same result as applying it once.
/// Only used on alphabetic-only input, which has no inner word boundaries.
pub fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    let mut upper = first.to_uppercase();
    let mut titled = String::with_capacity(value.len());
    titled.extend(upper.next());
    titled.extend(upper.flat_map(char::to_lowercase));
    titled.extend(chars.flat_map(char::to_lowercase));
    titled
}

fn validate_course(value: &str) -> Result<String, DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::BlankCourse);
    }
    Ok(value.to_string())
}
