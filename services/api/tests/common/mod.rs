//! Shared test doubles: an in-memory `StudyStore` plus canned LLM and PDF
//! adapters, so the real handlers can be driven without Postgres or OpenAI.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::Level;
use uuid::Uuid;

use api_lib::config::Config;
use api_lib::web::state::AppState;
use study_core::domain::{QuestionAnswer, StudyRecord, User, UserCredentials};
use study_core::ports::{
    PdfTextService, PortError, PortResult, QuestionGenerationService, StudyStore,
    SummarizationService,
};

//=========================================================================================
// In-memory store
//=========================================================================================

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<UserCredentials>>,
    sessions: Mutex<HashMap<String, (Uuid, DateTime<Utc>)>>,
    records: Mutex<Vec<StudyRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test backdoor: read a record straight out of the store.
    pub fn record(&self, record_id: Uuid) -> Option<StudyRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
    }

    /// Test backdoor: seed a record for a user.
    pub fn seed_record(&self, user_id: Uuid, source_text: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.records.lock().unwrap().push(StudyRecord {
            id,
            user_id,
            filename: None,
            source_text: source_text.to_string(),
            summary: None,
            questions: Vec::new(),
            created_at: Utc::now(),
        });
        id
    }
}

#[async_trait]
impl StudyStore for MemoryStore {
    async fn create_user(&self, username: &str, hashed_password: &str) -> PortResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.username == username) {
            return Err(PortError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }
        let user = UserCredentials {
            id: Uuid::new_v4(),
            username: username.to_string(),
            hashed_password: hashed_password.to_string(),
        };
        users.push(user.clone());
        Ok(User {
            id: user.id,
            username: user.username,
        })
    }

    async fn get_user(&self, user_id: Uuid) -> PortResult<User> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| User {
                id: u.id,
                username: u.username.clone(),
            })
            .ok_or_else(|| PortError::NotFound(format!("User {} not found", user_id)))
    }

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials> {
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or_else(|| PortError::NotFound(format!("User '{}' not found", username)))
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        self.sessions
            .lock()
            .unwrap()
            .insert(session_id.to_string(), (user_id, expires_at));
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        self.sessions
            .lock()
            .unwrap()
            .get(session_id)
            .filter(|(_, expires_at)| *expires_at > Utc::now())
            .map(|(user_id, _)| *user_id)
            .ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        self.sessions.lock().unwrap().remove(session_id);
        Ok(())
    }

    async fn create_record(
        &self,
        user_id: Uuid,
        source_text: &str,
        filename: Option<&str>,
    ) -> PortResult<StudyRecord> {
        let record = StudyRecord {
            id: Uuid::new_v4(),
            user_id,
            filename: filename.map(str::to_string),
            source_text: source_text.to_string(),
            summary: None,
            questions: Vec::new(),
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn attach_summary(&self, record_id: Uuid, summary: &str) -> PortResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| PortError::NotFound(format!("Study record {} not found", record_id)))?;
        record.summary = Some(summary.to_string());
        Ok(())
    }

    async fn attach_questions(
        &self,
        record_id: Uuid,
        questions: &[QuestionAnswer],
    ) -> PortResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| PortError::NotFound(format!("Study record {} not found", record_id)))?;
        record.questions = questions.to_vec();
        Ok(())
    }

    async fn records_for_user(&self, user_id: Uuid) -> PortResult<Vec<StudyRecord>> {
        // Insertion order reversed stands in for ORDER BY created_at DESC.
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .rev()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn delete_record(&self, record_id: Uuid, user_id: Uuid) -> PortResult<()> {
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| !(r.id == record_id && r.user_id == user_id));
        if records.len() == before {
            return Err(PortError::NotFound(format!(
                "Study record {} not found",
                record_id
            )));
        }
        Ok(())
    }
}

//=========================================================================================
// Canned gateway adapters
//=========================================================================================

/// A `SummarizationService` that always answers with a fixed reply.
pub struct StubSummarizer {
    pub reply: String,
}

#[async_trait]
impl SummarizationService for StubSummarizer {
    async fn summarize(&self, _text: &str) -> PortResult<String> {
        Ok(self.reply.clone())
    }
}

/// A `QuestionGenerationService` that always answers with a fixed completion.
pub struct StubQuestionGen {
    pub reply: String,
}

#[async_trait]
impl QuestionGenerationService for StubQuestionGen {
    async fn generate_questions(&self, _summary: &str) -> PortResult<String> {
        Ok(self.reply.clone())
    }
}

/// A `PdfTextService` that pretends every PDF contains the same text.
pub struct StubPdf {
    pub reply: String,
}

#[async_trait]
impl PdfTextService for StubPdf {
    async fn extract_text(&self, _pdf_bytes: &[u8]) -> PortResult<String> {
        Ok(self.reply.clone())
    }
}

//=========================================================================================
// State assembly
//=========================================================================================

pub fn test_config() -> Config {
    Config {
        bind_address: "127.0.0.1:0".parse::<SocketAddr>().unwrap(),
        database_url: String::new(),
        log_level: Level::INFO,
        openai_api_key: None,
        summary_model: "test-model".to_string(),
        question_model: "test-model".to_string(),
        max_text_length: 12_000,
        llm_timeout: Duration::from_secs(5),
        session_ttl_days: 30,
        cors_origin: "http://localhost:5173".to_string(),
    }
}

pub fn test_state(
    store: Arc<MemoryStore>,
    summary_reply: &str,
    question_reply: &str,
) -> Arc<AppState> {
    Arc::new(AppState {
        db: store,
        config: Arc::new(test_config()),
        summary_adapter: Arc::new(StubSummarizer {
            reply: summary_reply.to_string(),
        }),
        question_adapter: Arc::new(StubQuestionGen {
            reply: question_reply.to_string(),
        }),
        pdf_adapter: Arc::new(StubPdf {
            reply: "extracted pdf text".to_string(),
        }),
    })
}
