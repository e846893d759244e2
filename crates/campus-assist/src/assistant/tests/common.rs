use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::application::{ApplicationRecord, ApplicationStore, StoreError};
use crate::assistant::ports::{
    DialogEngine, DialogEngineError, GenerativeError, GenerativeModel, IntentRecognition,
};
use crate::assistant::prompts::Prompt;
use crate::assistant::router::{assistant_router, AssistantState};
use crate::assistant::service::ConversationService;
use crate::documents::pipeline::{DocumentIntakeService, OcrEngine, OcrError};

pub(super) fn recognition(intent: &str, confidence: f32, reply: &str) -> IntentRecognition {
    IntentRecognition {
        intent: intent.to_string(),
        confidence,
        reply: Some(reply.to_string()),
    }
}

/// Dialog engine that always returns the configured recognition.
pub(super) struct ScriptedDialog {
    pub(super) recognition: Option<IntentRecognition>,
}

impl DialogEngine for ScriptedDialog {
    fn recognize(
        &self,
        _session_id: &str,
        _text: &str,
    ) -> Result<Option<IntentRecognition>, DialogEngineError> {
        Ok(self.recognition.clone())
    }
}

/// Dialog engine that records the session ids it was handed.
#[derive(Default)]
pub(super) struct RecordingDialog {
    pub(super) sessions: Mutex<Vec<String>>,
}

impl DialogEngine for RecordingDialog {
    fn recognize(
        &self,
        session_id: &str,
        _text: &str,
    ) -> Result<Option<IntentRecognition>, DialogEngineError> {
        self.sessions
            .lock()
            .expect("session mutex poisoned")
            .push(session_id.to_string());
        Ok(Some(recognition("ProgramInfo", 0.9, "We offer four programmes.")))
    }
}

pub(super) struct BrokenDialog;

impl DialogEngine for BrokenDialog {
    fn recognize(
        &self,
        _session_id: &str,
        _text: &str,
    ) -> Result<Option<IntentRecognition>, DialogEngineError> {
        Err(DialogEngineError::Unavailable("timeout".to_string()))
    }
}

/// Generative model that returns a fixed completion and records prompts.
#[derive(Default)]
pub(super) struct CannedGenerative {
    pub(super) completion: String,
    pub(super) prompts: Mutex<Vec<Prompt>>,
}

impl CannedGenerative {
    pub(super) fn with_completion(completion: &str) -> Self {
        Self {
            completion: completion.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }
}

impl GenerativeModel for CannedGenerative {
    fn complete(&self, prompt: &Prompt) -> Result<String, GenerativeError> {
        self.prompts
            .lock()
            .expect("prompt mutex poisoned")
            .push(prompt.clone());
        Ok(self.completion.clone())
    }
}

pub(super) struct BrokenGenerative;

impl GenerativeModel for BrokenGenerative {
    fn complete(&self, _prompt: &Prompt) -> Result<String, GenerativeError> {
        Err(GenerativeError::Unavailable("throttled".to_string()))
    }
}

/// OCR stub that treats the uploaded bytes as UTF-8 text lines.
pub(super) struct PlainTextOcr;

impl OcrEngine for PlainTextOcr {
    fn extract_lines(&self, bytes: &[u8]) -> Result<Vec<String>, OcrError> {
        let text =
            std::str::from_utf8(bytes).map_err(|err| OcrError::Unreadable(err.to_string()))?;
        Ok(text.lines().map(str::to_string).collect())
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

pub(super) fn seeded_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::default());
    crate::application::seed_store(store.as_ref()).expect("seeding succeeds");
    store
}

pub(super) fn conversation_with(
    dialog: Option<IntentRecognition>,
    completion: &str,
) -> (
    ConversationService<ScriptedDialog, CannedGenerative, MemoryStore>,
    Arc<MemoryStore>,
) {
    let store = seeded_store();
    let service = ConversationService::new(
        Arc::new(ScriptedDialog { recognition: dialog }),
        Arc::new(CannedGenerative::with_completion(completion)),
        store.clone(),
    );
    (service, store)
}

pub(super) type TestState =
    AssistantState<ScriptedDialog, CannedGenerative, PlainTextOcr, MemoryStore>;

pub(super) fn router_with_state(
    dialog: Option<IntentRecognition>,
    completion: &str,
) -> (axum::Router, Arc<MemoryStore>) {
    let store = seeded_store();
    let conversation = ConversationService::new(
        Arc::new(ScriptedDialog { recognition: dialog }),
        Arc::new(CannedGenerative::with_completion(completion)),
        store.clone(),
    );
    let intake = DocumentIntakeService::new(Arc::new(PlainTextOcr), store.clone());
    let state: Arc<TestState> = Arc::new(AssistantState {
        conversation,
        intake,
        store: store.clone(),
    });
    (assistant_router(state), store)
}

pub(super) async fn read_json_body(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
