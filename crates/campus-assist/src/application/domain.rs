use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The four document slots every application must fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DocumentSlot {
    IdDocument,
    MatricCertificate,
    IncomeProof,
    BankStatements,
}

impl DocumentSlot {
    pub const ALL: [DocumentSlot; 4] = [
        DocumentSlot::IdDocument,
        DocumentSlot::MatricCertificate,
        DocumentSlot::IncomeProof,
        DocumentSlot::BankStatements,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            DocumentSlot::IdDocument => "ID Document",
            DocumentSlot::MatricCertificate => "Matric Certificate",
            DocumentSlot::IncomeProof => "Income Proof",
            DocumentSlot::BankStatements => "Bank Statements",
        }
    }
}

/// Verification state of a single document slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentState {
    Verified,
    Pending,
    Rejected,
    Missing,
}

/// Slot value: state plus the date of the most recent upload, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentEntry {
    pub state: DocumentState,
    pub uploaded: Option<NaiveDate>,
}

impl DocumentEntry {
    pub const fn missing() -> Self {
        Self {
            state: DocumentState::Missing,
            uploaded: None,
        }
    }
}

/// High level application status. After any recompute this is a pure function
/// of progress; `New` only survives until the first upload, and `Approved`
/// only arrives from seed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplicationStatus {
    New,
    DocumentsRequired,
    InProgress,
    NearlyComplete,
    UnderReview,
    Approved,
}

impl ApplicationStatus {
    pub const fn label(self) -> &'static str {
        match self {
            ApplicationStatus::New => "New Application",
            ApplicationStatus::DocumentsRequired => "Documents Required",
            ApplicationStatus::InProgress => "In Progress",
            ApplicationStatus::NearlyComplete => "Nearly Complete",
            ApplicationStatus::UnderReview => "Under Review",
            ApplicationStatus::Approved => "Approved",
        }
    }
}

/// The persisted per-student application record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub student_id: String,
    pub full_name: String,
    pub program: String,
    pub submitted: NaiveDate,
    pub status: ApplicationStatus,
    pub progress: u8,
    pub documents: BTreeMap<DocumentSlot, DocumentEntry>,
    pub next_steps: String,
}

impl ApplicationRecord {
    /// Fresh record with all required slots missing.
    pub fn new(student_id: &str, full_name: &str, program: &str, submitted: NaiveDate) -> Self {
        let documents = DocumentSlot::ALL
            .into_iter()
            .map(|slot| (slot, DocumentEntry::missing()))
            .collect();

        Self {
            student_id: student_id.to_string(),
            full_name: full_name.to_string(),
            program: program.to_string(),
            submitted,
            status: ApplicationStatus::New,
            progress: 0,
            documents,
            next_steps:
                "Welcome! Please start by uploading your ID Document to begin the application process."
                    .to_string(),
        }
    }

    pub fn verified_count(&self) -> usize {
        self.documents
            .values()
            .filter(|entry| entry.state == DocumentState::Verified)
            .count()
    }

    pub fn total_slots(&self) -> usize {
        self.documents.len()
    }

    /// Labels of slots still missing, in slot order.
    pub fn missing_labels(&self) -> Vec<&'static str> {
        self.documents
            .iter()
            .filter(|(_, entry)| entry.state == DocumentState::Missing)
            .map(|(slot, _)| slot.label())
            .collect()
    }

    /// Record one verification outcome and refresh the derived fields.
    pub fn apply_verification(&mut self, slot: DocumentSlot, verified: bool, uploaded: NaiveDate) {
        let state = if verified {
            DocumentState::Verified
        } else {
            DocumentState::Rejected
        };
        self.documents.insert(
            slot,
            DocumentEntry {
                state,
                uploaded: Some(uploaded),
            },
        );
        self.recompute();
    }

    /// Recompute progress and status.
    ///
    /// Invariant: progress = verified slots / total slots x 100, and status
    /// follows the decision table 100 -> Under Review, >= 75 -> Nearly
    /// Complete, >= 25 -> In Progress, else Documents Required.
    pub fn recompute(&mut self) {
        let total = self.total_slots().max(1);
        let verified = self.verified_count();
        self.progress = ((verified * 100) / total) as u8;

        if self.progress == 100 {
            self.status = ApplicationStatus::UnderReview;
            self.next_steps =
                "All documents submitted! Your application is under review.".to_string();
        } else if self.progress >= 75 {
            self.status = ApplicationStatus::NearlyComplete;
            self.next_steps = format!(
                "Almost done! Please upload: {}",
                self.missing_labels().join(", ")
            );
        } else if self.progress >= 25 {
            self.status = ApplicationStatus::InProgress;
            self.next_steps = format!(
                "Good progress! Still need: {}",
                self.missing_labels().join(", ")
            );
        } else {
            self.status = ApplicationStatus::DocumentsRequired;
            self.next_steps = "Please upload your required documents to continue.".to_string();
        }
    }
}
