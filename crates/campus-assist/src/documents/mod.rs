//! Document verification pipeline: OCR text extraction, name-candidate
//! scanning, identity verification, and document-type classification.
//!
//! Everything past the OCR port is heuristic keyword matching; confidence
//! scores are hand-assigned per rule, not statistical.

pub mod classifier;
pub mod identity;
pub mod names;
pub mod pipeline;
pub mod replies;
pub mod text;

#[cfg(test)]
mod tests;

pub use classifier::{
    classify_content, classify_filename, slot_for_upload, Classification, DocumentCategory,
};
pub use identity::{verify_claimed_name, IdentityMatch};
pub use names::extract_candidates;
pub use pipeline::{DocumentIntakeService, IntakeOutcome, OcrEngine, OcrError};
pub use replies::{accepted_reply, rejected_reply, required_documents, RequiredDocuments};
pub use text::normalize_letters;
