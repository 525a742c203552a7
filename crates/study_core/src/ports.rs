//! crates/study_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{QuestionAnswer, StudyRecord, User, UserCredentials};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Unauthorized")]
    Unauthorized,
    /// The upstream completion service answered, but with zero usable candidates.
    #[error("Upstream service returned an empty completion")]
    UpstreamEmpty,
    /// Transport or service-level failure talking to the upstream completion service.
    #[error("Upstream service failure: {0}")]
    Upstream(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait StudyStore: Send + Sync {
    // --- User Management ---

    /// Creates a user with an already-hashed password. Fails with
    /// `Conflict` when the username is taken (exact, case-sensitive match).
    async fn create_user(&self, username: &str, hashed_password: &str) -> PortResult<User>;

    async fn get_user(&self, user_id: Uuid) -> PortResult<User>;

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials>;

    // --- Auth Sessions ---

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Resolves a session token to its user. Absent or expired sessions
    /// yield `Unauthorized`, never a distinct "expired" error.
    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid>;

    /// Destroys a session. Idempotent: deleting a missing session is `Ok`.
    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()>;

    // --- Study Records ---

    /// Persists a new record with no summary and no questions.
    async fn create_record(
        &self,
        user_id: Uuid,
        source_text: &str,
        filename: Option<&str>,
    ) -> PortResult<StudyRecord>;

    /// Sets (or overwrites) the summary of an existing record.
    async fn attach_summary(&self, record_id: Uuid, summary: &str) -> PortResult<()>;

    /// Replaces the record's question list wholesale. Never appends.
    async fn attach_questions(
        &self,
        record_id: Uuid,
        questions: &[QuestionAnswer],
    ) -> PortResult<()>;

    /// All records owned by the user, newest first.
    async fn records_for_user(&self, user_id: Uuid) -> PortResult<Vec<StudyRecord>>;

    /// Deletes a record, but only if `user_id` owns it. A record owned by
    /// someone else and a record that does not exist produce the same
    /// `NotFound` so callers cannot probe for other users' records.
    async fn delete_record(&self, record_id: Uuid, user_id: Uuid) -> PortResult<()>;
}

#[async_trait]
pub trait SummarizationService: Send + Sync {
    /// Summarizes a block of text into a shorter one.
    async fn summarize(&self, text: &str) -> PortResult<String>;
}

#[async_trait]
pub trait QuestionGenerationService: Send + Sync {
    /// Generates practice-question text for a summary, in the `Q<n>:`/`A:`
    /// format the extractor expects. Returns the raw completion text;
    /// parsing it is [`crate::extract::extract_questions`]'s job.
    async fn generate_questions(&self, summary: &str) -> PortResult<String>;
}

#[async_trait]
pub trait PdfTextService: Send + Sync {
    /// Extracts plain text from the bytes of a PDF document.
    async fn extract_text(&self, pdf_bytes: &[u8]) -> PortResult<String>;
}
