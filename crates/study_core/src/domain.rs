//! crates/study_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format,
//! except where a value is persisted/served as JSON directly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Represents a user - used throughout app
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
}

// Only used internally for login/register - contains sensitive data
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub username: String,
    pub hashed_password: String,
}

// Represents a browser login session (auth cookie)
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub id: String,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
}

/// A single extracted question/answer pair.
///
/// Has no identity of its own; it lives and dies with its owning
/// [`StudyRecord`] and is stored inside it as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// One summarization session: the source text a user submitted, the
/// generated summary, and the practice questions generated from it.
#[derive(Debug, Clone)]
pub struct StudyRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Present only when the source text came from an uploaded PDF.
    pub filename: Option<String>,
    pub source_text: String,
    /// Unset until summarization completes.
    pub summary: Option<String>,
    /// Empty until question generation completes. Regeneration replaces
    /// the whole list, it never appends.
    pub questions: Vec<QuestionAnswer>,
    pub created_at: DateTime<Utc>,
}
