use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use campus_assist::accounts::{
    AccountDirectory, CredentialDigest, DirectoryError, StudentAccount,
};
use campus_assist::application::{
    seed_store, ApplicationRecord, ApplicationStore, RosterImporter, StoreError,
};
use campus_assist::assistant::{
    AssistantState, ConversationService, DialogEngine, DialogEngineError, GenerativeError,
    GenerativeModel, IntentRecognition, MediaError, MediaFetcher, Prompt, QueryCategory,
    FALLBACK_INTENT,
};
use campus_assist::documents::{DocumentIntakeService, OcrEngine, OcrError};
use campus_assist::error::AppError;
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationStore {
    records: Arc<Mutex<HashMap<String, ApplicationRecord>>>,
}

impl ApplicationStore for InMemoryApplicationStore {
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryAccountDirectory {
    accounts: Arc<Mutex<HashMap<String, StudentAccount>>>,
}

impl AccountDirectory for InMemoryAccountDirectory {
    fn fetch(&self, student_id: &str) -> Result<Option<StudentAccount>, DirectoryError> {
        let guard = self.accounts.lock().expect("directory mutex poisoned");
        Ok(guard.get(student_id).cloned())
    }

    fn insert(&self, account: StudentAccount) -> Result<(), DirectoryError> {
        let mut guard = self.accounts.lock().expect("directory mutex poisoned");
        if guard.contains_key(&account.student_id) {
            return Err(DirectoryError::Conflict);
        }
        guard.insert(account.student_id.clone(), account);
        Ok(())
    }
}

/// Demo login accounts matching the seeded applications. All use the demo
/// password, stored as a salted digest like any other account.
pub(crate) fn seed_demo_accounts(directory: &InMemoryAccountDirectory) {
    let demo_users = [
        ("DEMO001", "John Student", "john@student.example"),
        ("DEMO002", "Sarah Wilson", "sarah@student.example"),
        ("STU2025001", "Mike Johnson", "mike@student.example"),
    ];

    for (student_id, full_name, email) in demo_users {
        let account = StudentAccount {
            student_id: student_id.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
            credential: CredentialDigest::derive("password"),
            created_at: Utc::now(),
            active: true,
        };
        // conflicts just mean the account was already seeded
        let _ = directory.insert(account);
    }
}

/// Keyword intent recognizer standing in for a hosted dialog engine.
/// Unmatched utterances surface the designated fallback intent.
pub(crate) struct LexiconDialogEngine;

const INTENTS: &[(&str, &[&str], &str, f32)] = &[
    (
        "Greeting",
        &["hello", "hi ", "good morning", "good afternoon"],
        "Hello! I can tell you about programmes, fees, deadlines, and documents. What would you like to know?",
        0.85,
    ),
    (
        "ProgramInfo",
        &["program", "programme", "course list", "what courses"],
        "We offer Computer Science (4 years), Business Administration (3 years), Engineering (4 years), and Liberal Arts (3 years).",
        0.8,
    ),
    (
        "Fees",
        &["fee", "cost", "how much"],
        "The application fee is R500. Merit scholarships of R50,000 and need-based bursaries of R30,000 are available.",
        0.85,
    ),
    (
        "Deadlines",
        &["deadline", "closing date", "when do applications"],
        "Applications close December 15 for the first semester and June 15 for the second semester.",
        0.8,
    ),
    (
        "Funding",
        &["funding", "financial aid", "bursary", "scholarship"],
        "We offer merit scholarships (R50,000), need-based bursaries (R30,000), and work-study programmes.",
        0.75,
    ),
];

impl DialogEngine for LexiconDialogEngine {
    fn recognize(
        &self,
        _session_id: &str,
        text: &str,
    ) -> Result<Option<IntentRecognition>, DialogEngineError> {
        let lowered = text.to_lowercase();

        for (intent, keywords, reply, confidence) in INTENTS {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return Ok(Some(IntentRecognition {
                    intent: (*intent).to_string(),
                    confidence: *confidence,
                    reply: Some((*reply).to_string()),
                }));
            }
        }

        Ok(Some(IntentRecognition {
            intent: FALLBACK_INTENT.to_string(),
            confidence: 0.9,
            reply: Some("Sorry, I did not understand that.".to_string()),
        }))
    }
}

/// Offline completion backend. Replies are canned per prompt category and
/// deliberately include the verbal tics the reply formatter removes.
pub(crate) struct OfflineGenerativeModel;

impl GenerativeModel for OfflineGenerativeModel {
    fn complete(&self, prompt: &Prompt) -> Result<String, GenerativeError> {
        let body = match prompt.category {
            QueryCategory::Help => {
                "I can help with course information, admissions, financial aid, document \
                 uploads with automatic verification, and application status checks."
            }
            QueryCategory::CourseSteps | QueryCategory::ApplicationSteps => {
                "to apply: complete the online form, pay the R500 fee, upload your SA ID, \
                 Matric Certificate, Academic Transcripts and Motivation Letter, then wait \
                 2-3 weeks for review. Deadlines are December 15 and June 15."
            }
            QueryCategory::UploadHelp => {
                "use the Upload Documents button, pick your files, and each one is analysed \
                 and checked against your registered name automatically."
            }
            QueryCategory::General => {
                "Crestview University offers Computer Science, Business Administration, \
                 Engineering and Liberal Arts. The application fee is R500 and financial aid \
                 is available."
            }
        };

        Ok(format!("*speaks in a friendly tone* {body}"))
    }
}

/// OCR stand-in that reads the payload as UTF-8 text lines. Binary uploads
/// (real scans) are unreadable to it, which exercises the filename-fallback
/// path end to end.
pub(crate) struct PlainTextOcr;

impl OcrEngine for PlainTextOcr {
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>, OcrError> {
        let text =
            std::str::from_utf8(bytes).map_err(|err| OcrError::Unreadable(err.to_string()))?;
        Ok(text.lines().map(str::to_string).collect())
    }
}

/// Media fetcher used until transport credentials are configured; every
/// download reports "unavailable" and the webhook degrades gracefully.
pub(crate) struct UnconfiguredMediaFetcher;

impl MediaFetcher for UnconfiguredMediaFetcher {
    fn download(&self, _url: &str) -> Result<Option<Vec<u8>>, MediaError> {
        Ok(None)
    }
}

pub(crate) type Services = AssistantState<
    LexiconDialogEngine,
    OfflineGenerativeModel,
    PlainTextOcr,
    InMemoryApplicationStore,
>;

/// Build the service graph and seed the store, from a roster file when one
/// was configured and from the built-in defaults otherwise.
pub(crate) fn build_services(roster: Option<&Path>) -> Result<Arc<Services>, AppError> {
    let store = Arc::new(InMemoryApplicationStore::default());

    match roster {
        Some(path) => {
            for record in RosterImporter::from_path(path)? {
                store.put(record)?;
            }
        }
        None => {
            seed_store(store.as_ref())?;
        }
    }

    let conversation = ConversationService::new(
        Arc::new(LexiconDialogEngine),
        Arc::new(OfflineGenerativeModel),
        store.clone(),
    );
    let intake = DocumentIntakeService::new(Arc::new(PlainTextOcr), store.clone());

    Ok(Arc::new(AssistantState {
        conversation,
        intake,
        store,
    }))
}
