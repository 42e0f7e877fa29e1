//! The in-memory enrollment collection

use crate::domain::entities::Enrollment;

/// Ordered enrollments for the current session.
///
/// Insertion order is registration order. Duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    enrollments: Vec<Enrollment>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, enrollment: Enrollment) {
        self.enrollments.push(enrollment);
    }

    pub fn len(&self) -> usize {
        self.enrollments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enrollments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Enrollment> {
        self.enrollments.iter()
    }

    pub fn as_slice(&self) -> &[Enrollment] {
        &self.enrollments
    }

    /// True if `other` holds the same records in the same order.
    pub fn matches(&self, other: &[Enrollment]) -> bool {
        self.enrollments.as_slice() == other
    }
}

impl From<Vec<Enrollment>> for Roster {
    fn from(enrollments: Vec<Enrollment>) -> Self {
        Self { enrollments }
    }
}

impl<'a> IntoIterator for &'a Roster {
    type Item = &'a Enrollment;
    type IntoIter = std::slice::Iter<'a, Enrollment>;

    fn into_iter(self) -> Self::IntoIter {
        self.enrollments.iter()
    }
}
