use chrono::NaiveDate;
use thiserror::Error;

use crate::model::attendance::AttendanceRecord;

pub mod fs;
#[cfg(test)]
pub mod memory;

pub use fs::FsStore;
#[cfg(test)]
pub use memory::MemoryStore;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("log partition is malformed: {0}")]
    Csv(#[from] csv::Error),

    #[error("refusing to use file name {0:?}")]
    InvalidName(String),
}

/// Append-only store behind the check-in processor and the export builder.
///
/// One log partition per calendar date, images in a flat namespace keyed by file name.
pub trait AttendanceStore: Send + Sync {
    /// Appends to the partition for `date`, creating it (header first) if needed.
    fn append_record(&self, date: NaiveDate, record: &AttendanceRecord) -> Result<(), StorageError>;

    /// Records in insertion order, or `None` if no partition exists for `date`.
    fn list_records(&self, date: NaiveDate) -> Result<Option<Vec<AttendanceRecord>>, StorageError>;

    fn save_image(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError>;

    fn image_exists(&self, name: &str) -> bool;

    fn read_image(&self, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Persists a rendered export next to the partitions
    fn save_export(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Rejects anything that could escape the store's directory
pub(crate) fn checked_name(name: &str) -> Result<&str, StorageError> {
    if name.is_empty() || name.contains("..") || name.contains('/') || name.contains('\\') {
        return Err(StorageError::InvalidName(name.to_string()));
    }
    Ok(name)
}
