use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::application::{ApplicationRecord, ApplicationStore, DocumentSlot};

use super::classifier::{classify_content, classify_filename, slot_for_upload, Classification};
use super::identity::{verify_claimed_name, IdentityMatch};

/// Text-extraction boundary. Implementations return line-level text in the
/// service's reading order; real deployments wire an OCR backend here.
pub trait OcrEngine: Send + Sync {
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>, OcrError>;
}

#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("document is not readable: {0}")]
    Unreadable(String),
    #[error("ocr backend unavailable: {0}")]
    Backend(String),
}

/// When OCR fails we fall back to filename heuristics and accept the claim
/// only above this confidence. Intentionally more lenient than the OCR path.
pub const FILENAME_VERIFY_FLOOR: u8 = 30;

const FAILED_ANALYSIS_NOTE: &str = "Document analysis failed - using filename";

/// Everything a caller needs to report back on one upload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntakeOutcome {
    pub document_id: Uuid,
    pub slot: DocumentSlot,
    pub verified: bool,
    pub found_names: Vec<String>,
    pub classification: Classification,
    /// True when the OCR call failed and filename heuristics were used.
    pub ocr_degraded: bool,
    /// Refreshed application record after the verification was persisted,
    /// when the store cooperated.
    pub record: Option<ApplicationRecord>,
}

/// Runs the upload pipeline: OCR, identity verification, classification,
/// and the application-record update.
///
/// Internal failures never escape: OCR errors degrade to filename
/// heuristics, and store errors are logged while the analysis result is
/// still returned.
pub struct DocumentIntakeService<O, S> {
    ocr: Arc<O>,
    store: Arc<S>,
}

impl<O, S> DocumentIntakeService<O, S>
where
    O: OcrEngine,
    S: ApplicationStore,
{
    pub fn new(ocr: Arc<O>, store: Arc<S>) -> Self {
        Self { ocr, store }
    }

    pub fn process(&self, claimed_name: &str, filename: &str, bytes: &[u8]) -> IntakeOutcome {
        self.process_dated(claimed_name, filename, bytes, Local::now().date_naive())
    }

    pub fn process_dated(
        &self,
        claimed_name: &str,
        filename: &str,
        bytes: &[u8],
        today: NaiveDate,
    ) -> IntakeOutcome {
        let (verified, found_names, classification, ocr_degraded) =
            match self.ocr.extract_lines(bytes) {
                Ok(lines) => {
                    let text = lines.join(" ");
                    debug!(
                        filename,
                        text_len = text.len(),
                        "extracted document text"
                    );
                    let IdentityMatch {
                        verified,
                        found_names,
                    } = verify_claimed_name(&text, claimed_name);
                    let classification = classify_content(&text.to_lowercase(), filename);
                    (verified, found_names, classification, false)
                }
                Err(err) => {
                    warn!(%err, filename, "text extraction failed, falling back to filename heuristics");
                    let classification = classify_filename(filename);
                    let verified = classification.confidence > FILENAME_VERIFY_FLOOR;
                    (
                        verified,
                        vec![FAILED_ANALYSIS_NOTE.to_string()],
                        classification,
                        true,
                    )
                }
            };

        let slot = slot_for_upload(filename);
        let record = self.persist(claimed_name, slot, verified, today);

        IntakeOutcome {
            document_id: Uuid::new_v4(),
            slot,
            verified,
            found_names,
            classification,
            ocr_degraded,
            record,
        }
    }

    /// Read-modify-write of the whole record. Concurrent uploads for the
    /// same student can interleave; the later writer wins (open issue).
    fn persist(
        &self,
        claimed_name: &str,
        slot: DocumentSlot,
        verified: bool,
        today: NaiveDate,
    ) -> Option<ApplicationRecord> {
        let mut record = match self.store.fetch(claimed_name) {
            Ok(Some(record)) => record,
            Ok(None) => ApplicationRecord::new(
                &format!("STU{}", today.format("%Y%m%d")),
                claimed_name,
                "General Studies",
                today,
            ),
            Err(err) => {
                warn!(%err, claimed_name, "could not load application record");
                return None;
            }
        };

        record.apply_verification(slot, verified, today);

        if let Err(err) = self.store.put(record.clone()) {
            warn!(%err, claimed_name, "failed to persist application update");
        }

        Some(record)
    }
}
