use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use super::domain::{
    ApplicationRecord, ApplicationStatus, DocumentEntry, DocumentSlot, DocumentState,
};
use super::store::{ApplicationStore, StoreError};

/// Demo applications previously kept as a hard-coded in-memory mapping. They
/// are now loaded explicitly into the store at startup instead of shadowing
/// it from a second mutable global.
pub fn seed_defaults() -> Vec<ApplicationRecord> {
    vec![
        seed_record(
            "DEMO001",
            "John Student",
            "Computer Science",
            date(2025, 10, 15),
            ApplicationStatus::UnderReview,
            75,
            [
                (DocumentState::Verified, Some(date(2025, 10, 15))),
                (DocumentState::Verified, Some(date(2025, 10, 16))),
                (DocumentState::Pending, Some(date(2025, 10, 17))),
                (DocumentState::Missing, None),
            ],
            "Please upload your 3-month bank statements to complete your application.",
        ),
        seed_record(
            "DEMO002",
            "Sarah Wilson",
            "Business Administration",
            date(2025, 10, 12),
            ApplicationStatus::Approved,
            100,
            [
                (DocumentState::Verified, Some(date(2025, 10, 12))),
                (DocumentState::Verified, Some(date(2025, 10, 12))),
                (DocumentState::Verified, Some(date(2025, 10, 13))),
                (DocumentState::Verified, Some(date(2025, 10, 14))),
            ],
            "Congratulations! Your application has been approved. Check your email for enrolment details.",
        ),
        seed_record(
            "STU2025001",
            "Mike Johnson",
            "Engineering",
            date(2025, 10, 20),
            ApplicationStatus::DocumentsRequired,
            25,
            [
                (DocumentState::Verified, Some(date(2025, 10, 20))),
                (DocumentState::Missing, None),
                (DocumentState::Missing, None),
                (DocumentState::Missing, None),
            ],
            "Please upload your Matric Certificate, Income Proof, and Bank Statements.",
        ),
        seed_record(
            "STU2025014",
            "Naledi Mokoena",
            "Data Science",
            date(2025, 10, 22),
            ApplicationStatus::New,
            0,
            [
                (DocumentState::Missing, None),
                (DocumentState::Missing, None),
                (DocumentState::Missing, None),
                (DocumentState::Missing, None),
            ],
            "Welcome! Please start by uploading your ID Document to begin the application process.",
        ),
    ]
}

/// Load the default demo applications into the store.
pub fn seed_store<S: ApplicationStore>(store: &S) -> Result<usize, StoreError> {
    let records = seed_defaults();
    let count = records.len();
    for record in records {
        store.put(record)?;
    }
    info!(count, "seeded default applications");
    Ok(count)
}

#[allow(clippy::too_many_arguments)]
fn seed_record(
    student_id: &str,
    full_name: &str,
    program: &str,
    submitted: NaiveDate,
    status: ApplicationStatus,
    progress: u8,
    slots: [(DocumentState, Option<NaiveDate>); 4],
    next_steps: &str,
) -> ApplicationRecord {
    let documents: BTreeMap<DocumentSlot, DocumentEntry> = DocumentSlot::ALL
        .into_iter()
        .zip(slots)
        .map(|(slot, (state, uploaded))| (slot, DocumentEntry { state, uploaded }))
        .collect();

    ApplicationRecord {
        student_id: student_id.to_string(),
        full_name: full_name.to_string(),
        program: program.to_string(),
        submitted,
        status,
        progress,
        documents,
        next_steps: next_steps.to_string(),
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid seed date")
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    student_id: String,
    full_name: String,
    program: String,
    submitted: String,
    id_document: String,
    matric_certificate: String,
    income_proof: String,
    bank_statements: String,
}

/// Imports application records from a CSV roster export.
///
/// Expected header: `student_id,full_name,program,submitted,id_document,
/// matric_certificate,income_proof,bank_statements`, where the document
/// columns carry one of `verified`, `pending`, `rejected`, or `missing`.
/// Progress and status are recomputed after import.
pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<ApplicationRecord>, RosterImportError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<ApplicationRecord>, RosterImportError> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut records = Vec::new();

        for row in csv_reader.deserialize::<RosterRow>() {
            let row = row?;
            records.push(Self::record_from_row(row)?);
        }

        Ok(records)
    }

    fn record_from_row(row: RosterRow) -> Result<ApplicationRecord, RosterImportError> {
        let submitted = NaiveDate::parse_from_str(row.submitted.trim(), "%Y-%m-%d").map_err(
            |_| RosterImportError::InvalidDate {
                student_id: row.student_id.clone(),
                value: row.submitted.clone(),
            },
        )?;

        let states = [
            (DocumentSlot::IdDocument, row.id_document.as_str()),
            (DocumentSlot::MatricCertificate, row.matric_certificate.as_str()),
            (DocumentSlot::IncomeProof, row.income_proof.as_str()),
            (DocumentSlot::BankStatements, row.bank_statements.as_str()),
        ];

        let mut documents = BTreeMap::new();
        for (slot, raw) in states {
            let state = parse_state(raw).ok_or_else(|| RosterImportError::InvalidState {
                student_id: row.student_id.clone(),
                value: raw.to_string(),
            })?;
            let uploaded = match state {
                DocumentState::Missing => None,
                _ => Some(submitted),
            };
            documents.insert(slot, DocumentEntry { state, uploaded });
        }

        let mut record = ApplicationRecord {
            student_id: row.student_id.trim().to_string(),
            full_name: row.full_name.trim().to_string(),
            program: row.program.trim().to_string(),
            submitted,
            status: ApplicationStatus::New,
            progress: 0,
            documents,
            next_steps: String::new(),
        };
        record.recompute();
        Ok(record)
    }
}

fn parse_state(raw: &str) -> Option<DocumentState> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "verified" => Some(DocumentState::Verified),
        "pending" => Some(DocumentState::Pending),
        "rejected" => Some(DocumentState::Rejected),
        "missing" | "" => Some(DocumentState::Missing),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RosterImportError {
    #[error("failed to read roster: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse roster csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid submitted date '{value}' for {student_id}")]
    InvalidDate { student_id: String, value: String },
    #[error("invalid document state '{value}' for {student_id}")]
    InvalidState { student_id: String, value: String },
}
