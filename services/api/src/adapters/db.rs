//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `StudyStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use study_core::domain::{QuestionAnswer, StudyRecord, User, UserCredentials};
use study_core::ports::{PortError, PortResult, StudyStore};
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `StudyStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    id: Uuid,
    username: String,
}
impl UserRecord {
    fn to_domain(self) -> User {
        User {
            id: self.id,
            username: self.username,
        }
    }
}

#[derive(FromRow)]
struct CredentialsRecord {
    id: Uuid,
    username: String,
    hashed_password: String,
}
impl CredentialsRecord {
    fn to_domain(self) -> UserCredentials {
        UserCredentials {
            id: self.id,
            username: self.username,
            hashed_password: self.hashed_password,
        }
    }
}

#[derive(FromRow)]
struct StudyRecordRow {
    id: Uuid,
    user_id: Uuid,
    filename: Option<String>,
    source_text: String,
    summary: Option<String>,
    questions: Json<Vec<QuestionAnswer>>,
    created_at: DateTime<Utc>,
}
impl StudyRecordRow {
    fn to_domain(self) -> StudyRecord {
        StudyRecord {
            id: self.id,
            user_id: self.user_id,
            filename: self.filename,
            source_text: self.source_text,
            summary: self.summary,
            questions: self.questions.0,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// `StudyStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl StudyStore for DbAdapter {
    async fn create_user(&self, username: &str, hashed_password: &str) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (id, username, hashed_password) VALUES ($1, $2, $3) RETURNING id, username",
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(hashed_password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                PortError::Conflict(format!("Username '{}' is already taken", username))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }

    async fn get_user(&self, user_id: Uuid) -> PortResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => PortError::NotFound(format!("User {} not found", user_id)),
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }

    async fn get_user_by_username(&self, username: &str) -> PortResult<UserCredentials> {
        let record = sqlx::query_as::<_, CredentialsRecord>(
            "SELECT id, username, hashed_password FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => {
                PortError::NotFound(format!("User '{}' not found", username))
            }
            _ => PortError::Unexpected(e.to_string()),
        })?;
        Ok(record.to_domain())
    }

    async fn create_auth_session(
        &self,
        session_id: &str,
        user_id: Uuid,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        sqlx::query("INSERT INTO auth_sessions (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(session_id)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn validate_auth_session(&self, session_id: &str) -> PortResult<Uuid> {
        // Absent and expired sessions are deliberately indistinguishable.
        let row: Option<(Uuid,)> = sqlx::query_as(
            "SELECT user_id FROM auth_sessions WHERE id = $1 AND expires_at > NOW()",
        )
        .bind(session_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        row.map(|(user_id,)| user_id).ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, session_id: &str) -> PortResult<()> {
        // Idempotent: deleting a session that is already gone is fine.
        sqlx::query("DELETE FROM auth_sessions WHERE id = $1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(())
    }

    async fn create_record(
        &self,
        user_id: Uuid,
        source_text: &str,
        filename: Option<&str>,
    ) -> PortResult<StudyRecord> {
        let record = sqlx::query_as::<_, StudyRecordRow>(
            "INSERT INTO study_records (id, user_id, filename, source_text) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_id, filename, source_text, summary, questions, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(filename)
        .bind(source_text)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(record.to_domain())
    }

    async fn attach_summary(&self, record_id: Uuid, summary: &str) -> PortResult<()> {
        let result = sqlx::query("UPDATE study_records SET summary = $1 WHERE id = $2")
            .bind(summary)
            .bind(record_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Study record {} not found",
                record_id
            )));
        }
        Ok(())
    }

    async fn attach_questions(
        &self,
        record_id: Uuid,
        questions: &[QuestionAnswer],
    ) -> PortResult<()> {
        // One UPDATE replaces the whole list; the JSONB column keeps the
        // replacement atomic without a transaction.
        let result = sqlx::query("UPDATE study_records SET questions = $1 WHERE id = $2")
            .bind(Json(questions))
            .bind(record_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Study record {} not found",
                record_id
            )));
        }
        Ok(())
    }

    async fn records_for_user(&self, user_id: Uuid) -> PortResult<Vec<StudyRecord>> {
        let records = sqlx::query_as::<_, StudyRecordRow>(
            "SELECT id, user_id, filename, source_text, summary, questions, created_at \
             FROM study_records WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Unexpected(e.to_string()))?;

        Ok(records.into_iter().map(|r| r.to_domain()).collect())
    }

    async fn delete_record(&self, record_id: Uuid, user_id: Uuid) -> PortResult<()> {
        // Filtering on the owner here means a non-owned record and a
        // nonexistent one produce the same NotFound, leaking nothing.
        let result = sqlx::query("DELETE FROM study_records WHERE id = $1 AND user_id = $2")
            .bind(record_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!(
                "Study record {} not found",
                record_id
            )));
        }
        Ok(())
    }
}
