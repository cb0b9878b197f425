use std::collections::HashMap;
use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::NaiveDate;

use super::{AttendanceStore, StorageError, checked_name};
use crate::model::attendance::AttendanceRecord;

/// In-memory stand-in for [`super::FsStore`]
#[derive(Default)]
pub struct MemoryStore {
    partitions: Mutex<HashMap<NaiveDate, Vec<AttendanceRecord>>>,
    images: Mutex<HashMap<String, Vec<u8>>>,
    exports: Mutex<HashMap<String, Vec<u8>>>,
    fail_image_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_image_writes(&self, fail: bool) {
        self.fail_image_writes.store(fail, Ordering::SeqCst);
    }

    pub fn remove_image(&self, name: &str) {
        self.images.lock().unwrap().remove(name);
    }

    pub fn image_count(&self) -> usize {
        self.images.lock().unwrap().len()
    }

    pub fn image(&self, name: &str) -> Option<Vec<u8>> {
        self.images.lock().unwrap().get(name).cloned()
    }

    pub fn partition_count(&self) -> usize {
        self.partitions.lock().unwrap().len()
    }

    pub fn export(&self, name: &str) -> Option<Vec<u8>> {
        self.exports.lock().unwrap().get(name).cloned()
    }
}

impl AttendanceStore for MemoryStore {
    fn append_record(&self, date: NaiveDate, record: &AttendanceRecord) -> Result<(), StorageError> {
        self.partitions
            .lock()
            .unwrap()
            .entry(date)
            .or_default()
            .push(record.clone());
        Ok(())
    }

    fn list_records(&self, date: NaiveDate) -> Result<Option<Vec<AttendanceRecord>>, StorageError> {
        Ok(self.partitions.lock().unwrap().get(&date).cloned())
    }

    fn save_image(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        if self.fail_image_writes.load(Ordering::SeqCst) {
            return Err(io::Error::other("disk full").into());
        }
        self.images
            .lock()
            .unwrap()
            .insert(checked_name(name)?.to_string(), bytes.to_vec());
        Ok(())
    }

    fn image_exists(&self, name: &str) -> bool {
        self.images.lock().unwrap().contains_key(name)
    }

    fn read_image(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        self.image(name)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound).into())
    }

    fn save_export(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.exports
            .lock()
            .unwrap()
            .insert(checked_name(name)?.to_string(), bytes.to_vec());
        Ok(())
    }
}
