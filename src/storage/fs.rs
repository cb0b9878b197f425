use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDate;
use tracing::debug;

use super::{AttendanceStore, StorageError, checked_name};
use crate::model::attendance::{AttendanceRecord, LOG_HEADER};
use crate::utils::filename::log_filename;

/// Filesystem store: `<data_dir>/attendance_<date>.csv` partitions and `<data_dir>/images/`.
pub struct FsStore {
    data_dir: PathBuf,
    images_dir: PathBuf,
    // serializes "does the partition exist / write header" across worker threads
    append_lock: Mutex<()>,
}

impl FsStore {
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        let images_dir = data_dir.join("images");
        fs::create_dir_all(&images_dir)?;

        Ok(Self {
            data_dir,
            images_dir,
            append_lock: Mutex::new(()),
        })
    }

    pub fn partition_path(&self, date: NaiveDate) -> PathBuf {
        self.data_dir.join(log_filename(date))
    }

    fn image_path(&self, name: &str) -> Result<PathBuf, StorageError> {
        Ok(self.images_dir.join(checked_name(name)?))
    }
}

fn needs_header(path: &Path) -> bool {
    fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true)
}

impl AttendanceStore for FsStore {
    fn append_record(&self, date: NaiveDate, record: &AttendanceRecord) -> Result<(), StorageError> {
        let _guard = self.append_lock.lock().unwrap_or_else(|e| e.into_inner());

        let path = self.partition_path(date);
        let write_header = needs_header(&path);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if write_header {
            debug!(path = %path.display(), "Creating log partition");
            writer.write_record(LOG_HEADER)?;
        }
        writer.serialize(record)?;
        writer.flush()?;

        Ok(())
    }

    fn list_records(&self, date: NaiveDate) -> Result<Option<Vec<AttendanceRecord>>, StorageError> {
        let path = self.partition_path(date);
        if !path.is_file() {
            return Ok(None);
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)?;

        let records = reader
            .deserialize()
            .collect::<Result<Vec<AttendanceRecord>, _>>()?;

        Ok(Some(records))
    }

    fn save_image(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.image_path(name)?;
        fs::write(path, bytes)?;
        Ok(())
    }

    fn image_exists(&self, name: &str) -> bool {
        self.image_path(name).map(|p| p.is_file()).unwrap_or(false)
    }

    fn read_image(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        Ok(fs::read(self.image_path(name)?)?)
    }

    fn save_export(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.data_dir.join(checked_name(name)?);
        fs::write(path, bytes)?;
        Ok(())
    }
}
