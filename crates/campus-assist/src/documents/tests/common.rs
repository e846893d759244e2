use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use crate::application::{ApplicationRecord, ApplicationStore, StoreError};
use crate::documents::pipeline::{DocumentIntakeService, OcrEngine, OcrError};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 11, 3).expect("valid date")
}

/// OCR stub that treats the uploaded bytes as UTF-8 text lines.
pub(super) struct PlainTextOcr;

impl OcrEngine for PlainTextOcr {
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>, OcrError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|err| OcrError::Unreadable(err.to_string()))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// OCR stub that always fails, driving the filename fallback path.
pub(super) struct BrokenOcr;

impl OcrEngine for BrokenOcr {
    fn extract_lines(&self, _bytes: &[u8]) -> Result<Vec<String>, OcrError> {
        Err(OcrError::Backend("service unavailable".to_string()))
    }
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

pub(super) struct UnavailableStore;

impl ApplicationStore for UnavailableStore {
    fn fetch(&self, _full_name: &str) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("table offline".to_string()))
    }

    fn fetch_by_student_id(
        &self,
        _student_id: &str,
    ) -> Result<Option<ApplicationRecord>, StoreError> {
        Err(StoreError::Unavailable("table offline".to_string()))
    }

    fn put(&self, _record: ApplicationRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("table offline".to_string()))
    }
}

pub(super) fn intake_with_text_ocr() -> (DocumentIntakeService<PlainTextOcr, MemoryStore>, Arc<MemoryStore>)
{
    let store = Arc::new(MemoryStore::default());
    let service = DocumentIntakeService::new(Arc::new(PlainTextOcr), store.clone());
    (service, store)
}

pub(super) fn intake_with_broken_ocr() -> (DocumentIntakeService<BrokenOcr, MemoryStore>, Arc<MemoryStore>)
{
    let store = Arc::new(MemoryStore::default());
    let service = DocumentIntakeService::new(Arc::new(BrokenOcr), store.clone());
    (service, store)
}
