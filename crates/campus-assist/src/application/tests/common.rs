use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::application::domain::ApplicationRecord;
use crate::application::store::{ApplicationStore, StoreError};

pub(super) fn upload_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date")
}

pub(super) fn fresh_record(full_name: &str) -> ApplicationRecord {
    ApplicationRecord::new("STU2025099", full_name, "Computer Science", upload_date())
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) records: Arc<Mutex<HashMap<String, ApplicationRecord>>>,
}

impl ApplicationStore for MemoryStore {
    fn fetch(&self, full_name: &str) -> Result<Option<ApplicationRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard.get(full_name).cloned())
    }

    fn fetch_by_student_id(
        &self,
        student_id: &str,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        let guard = self.records.lock().expect("store mutex poisoned");
        Ok(guard
            .values()
            .find(|record| record.student_id == student_id)
            .cloned())
    }

    fn put(&self, record: ApplicationRecord) -> Result<(), StoreError> {
        let mut guard = self.records.lock().expect("store mutex poisoned");
        guard.insert(record.full_name.clone(), record);
        Ok(())
    }
}

