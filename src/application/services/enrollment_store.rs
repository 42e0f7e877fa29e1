//! Enrollment file persistence
//!
//! Reads and writes the whole enrollment collection as one JSON array.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Enrollment, Named};
use crate::infrastructure::traits::FileSystem;

/// On-disk shape of one enrollment.
///
/// Field order here is the key order in the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnrollmentRecord {
    pub first_name: String,
    pub last_name: String,
    pub course_name: String,
}

impl From<&Enrollment> for EnrollmentRecord {
    fn from(enrollment: &Enrollment) -> Self {
        Self {
            first_name: enrollment.first_name().to_string(),
            last_name: enrollment.last_name().to_string(),
            course_name: enrollment.course().to_string(),
        }
    }
}

impl TryFrom<EnrollmentRecord> for Enrollment {
    type Error = crate::domain::DomainError;

    fn try_from(record: EnrollmentRecord) -> Result<Self, Self::Error> {
        Enrollment::new(&record.first_name, &record.last_name, &record.course_name)
    }
}

/// Service for loading and saving the enrollment file.
#[derive(Clone)]
pub struct EnrollmentStore {
    fs: Arc<dyn FileSystem>,
}

impl EnrollmentStore {
    /// Create a new enrollment store.
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Load every enrollment in `path`, preserving file order.
    ///
    /// Fails on the first record that does not validate; nothing partial
    /// is returned.
    #[instrument(skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Vec<Enrollment>> {
        let content = match self.fs.read_to_string(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(ApplicationError::MissingFile(path.to_path_buf()));
            }
            other => other.with_path_context("read enrollment file", path)?,
        };

        let records: Vec<EnrollmentRecord> =
            serde_json::from_str(&content).map_err(|e| ApplicationError::OperationFailed {
                context: format!("parse enrollment file {}", path.display()),
                source: Box::new(e),
            })?;

        let enrollments = records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                Enrollment::try_from(record).map_err(|source| ApplicationError::InvalidRecord {
                    path: path.to_path_buf(),
                    index,
                    source,
                })
            })
            .collect::<ApplicationResult<Vec<_>>>()?;

        debug!("load: {} enrollments from {}", enrollments.len(), path.display());
        Ok(enrollments)
    }

    /// Overwrite `path` with `enrollments` as an indented JSON array.
    ///
    /// The document is fully serialized before the file is opened. The
    /// write itself is a plain overwrite, not an atomic replace.
    #[instrument(skip(self, enrollments), fields(count = enrollments.len()))]
    pub fn save(&self, path: &Path, enrollments: &[Enrollment]) -> ApplicationResult<()> {
        let records: Vec<EnrollmentRecord> = enrollments.iter().map(Into::into).collect();
        let json = serde_json::to_string_pretty(&records).map_err(|source| {
            ApplicationError::Serialize {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.fs
            .ensure_parent(path)
            .with_path_context("create parent directory", path)?;
        self.fs
            .write(path, &json)
            .with_path_context("write enrollment file", path)?;

        debug!("save: {} enrollments to {}", records.len(), path.display());
        Ok(())
    }
}
