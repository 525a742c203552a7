//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the REST API endpoints and the master
//! definition for the OpenAPI specification.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::web::state::AppState;
use study_core::domain::{QuestionAnswer, StudyRecord};
use study_core::extract::extract_questions;
use study_core::normalize::normalize;
use study_core::ports::PortError;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        summarize_handler,
        generate_questions_handler,
        upload_handler,
        list_summaries_handler,
        delete_summary_handler,
        crate::web::auth::register_handler,
        crate::web::auth::login_handler,
        crate::web::auth::me_handler,
        crate::web::auth::logout_handler,
    ),
    components(
        schemas(
            SummarizeRequest,
            SummarizeResponse,
            GenerateQuestionsRequest,
            QuestionsResponse,
            QuestionPayload,
            UploadResponse,
            StudyRecordPayload,
            DeleteResponse,
            crate::web::auth::RegisterRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::UserPayload,
            crate::web::auth::UserResponse,
            crate::web::auth::MessageResponse,
        )
    ),
    tags(
        (name = "Study Summarizer API", description = "API endpoints for summarizing study material and generating practice questions.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct SummarizeRequest {
    pub text: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
    #[serde(rename = "summaryId")]
    pub summary_id: Uuid,
}

#[derive(Deserialize, ToSchema)]
pub struct GenerateQuestionsRequest {
    #[serde(rename = "summaryId")]
    pub summary_id: Option<Uuid>,
    pub summary: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct QuestionPayload {
    pub question: String,
    pub answer: String,
}

impl From<QuestionAnswer> for QuestionPayload {
    fn from(qa: QuestionAnswer) -> Self {
        Self {
            question: qa.question,
            answer: qa.answer,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct QuestionsResponse {
    pub questions: Vec<QuestionPayload>,
}

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub text: String,
}

/// The wire shape of one study record, field names matching the client.
#[derive(Serialize, ToSchema)]
pub struct StudyRecordPayload {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub filename: Option<String>,
    pub text: String,
    pub summary: Option<String>,
    pub questions: Vec<QuestionPayload>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl From<StudyRecord> for StudyRecordPayload {
    fn from(record: StudyRecord) -> Self {
        Self {
            id: record.id,
            filename: record.filename,
            text: record.source_text,
            summary: record.summary,
            questions: record.questions.into_iter().map(Into::into).collect(),
            created_at: record.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Maps a store failure to a response without leaking internals.
fn store_error(context: &str, e: PortError) -> (StatusCode, String) {
    match e {
        PortError::NotFound(_) => (StatusCode::NOT_FOUND, format!("{} not found", context)),
        PortError::Unauthorized => (StatusCode::UNAUTHORIZED, "Not authenticated".to_string()),
        other => {
            error!("{} failed: {:?}", context, other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{} failed", context),
            )
        }
    }
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// Summarize a block of text and persist the result as a new study record.
#[utoipa::path(
    post,
    path = "/summarize",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary generated", body = SummarizeResponse),
        (status = 400, description = "No text provided, or text too long"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Summarization failed upstream")
    )
)]
pub async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<SummarizeRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Validate the input against the length policy. Rejected input is
    //    the caller's to fix; nothing is truncated here.
    let text = normalize(
        req.text.as_deref().unwrap_or_default(),
        state.config.max_text_length,
    )
    .map_err(|e| (StatusCode::BAD_REQUEST, e.to_string()))?;

    // 2. One summarization attempt; upstream failure surfaces immediately.
    let summary = state.summary_adapter.summarize(&text).await.map_err(|e| {
        error!("Summarization failed: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Summarization failed. Please try again.".to_string(),
        )
    })?;

    // 3. Persist: create the record, then attach the summary to it.
    let record = state
        .db
        .create_record(user_id, &text, None)
        .await
        .map_err(|e| store_error("Saving summary", e))?;
    state
        .db
        .attach_summary(record.id, &summary)
        .await
        .map_err(|e| store_error("Saving summary", e))?;

    Ok(Json(SummarizeResponse {
        summary,
        summary_id: record.id,
    }))
}

/// Generate practice questions for an existing summary.
///
/// The raw completion is parsed into structured pairs; the record's
/// question list is replaced with the new set.
#[utoipa::path(
    post,
    path = "/generate-questions",
    request_body = GenerateQuestionsRequest,
    responses(
        (status = 200, description = "Questions generated", body = QuestionsResponse),
        (status = 400, description = "Missing summaryId or summary"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Study record not found"),
        (status = 500, description = "Generation or extraction failed")
    )
)]
pub async fn generate_questions_handler(
    State(state): State<Arc<AppState>>,
    Extension(_user_id): Extension<Uuid>,
    Json(req): Json<GenerateQuestionsRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let (summary_id, summary) = match (req.summary_id, req.summary.as_deref()) {
        (Some(id), Some(summary)) if !summary.trim().is_empty() => (id, summary),
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                "Missing summaryId or summary".to_string(),
            ))
        }
    };

    // 1. Ask the LLM for question text in the extractor's format.
    let raw = state
        .question_adapter
        .generate_questions(summary)
        .await
        .map_err(|e| {
            error!("Question generation failed: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Question generation failed. Please try again.".to_string(),
            )
        })?;

    // 2. Parse it. Zero extracted pairs is a hard failure, not an empty
    //    success: the prompt asks for exactly 3, so zero means format drift.
    let questions = extract_questions(&raw).map_err(|e| {
        error!("Extraction found no questions in completion: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Question generation failed. Please try again.".to_string(),
        )
    })?;

    // 3. Replace the record's question list with the new set.
    state
        .db
        .attach_questions(summary_id, &questions)
        .await
        .map_err(|e| store_error("Study record", e))?;

    Ok(Json(QuestionsResponse {
        questions: questions.into_iter().map(Into::into).collect(),
    }))
}

/// Upload a PDF and persist its extracted text as a new study record.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content_type = "multipart/form-data", description = "A `pdf` field holding the document."),
    responses(
        (status = 200, description = "Text extracted", body = UploadResponse),
        (status = 400, description = "No file uploaded"),
        (status = 401, description = "Not authenticated"),
        (status = 500, description = "Text extraction failed")
    )
)]
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    // 1. Find the `pdf` field.
    let mut upload: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart data: {}", e),
        )
    })? {
        if field.name() == Some("pdf") {
            let filename = field.file_name().unwrap_or("untitled.pdf").to_string();
            let data = field.bytes().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read file bytes: {}", e),
                )
            })?;
            upload = Some((filename, data.to_vec()));
            break;
        }
    }
    let (filename, data) =
        upload.ok_or((StatusCode::BAD_REQUEST, "No file uploaded".to_string()))?;

    // 2. Extract the text.
    let text = state.pdf_adapter.extract_text(&data).await.map_err(|e| {
        error!("PDF extraction failed for '{}': {:?}", filename, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to extract text from PDF".to_string(),
        )
    })?;
    let text = text.trim().to_string();

    // 3. Persist the raw extracted text; summarization happens when the
    //    user submits it.
    state
        .db
        .create_record(user_id, &text, Some(&filename))
        .await
        .map_err(|e| store_error("Saving upload", e))?;

    Ok(Json(UploadResponse { text }))
}

/// List the requesting user's study records, newest first.
#[utoipa::path(
    get,
    path = "/summaries",
    responses(
        (status = 200, description = "The user's study records", body = [StudyRecordPayload]),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_summaries_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let records = state
        .db
        .records_for_user(user_id)
        .await
        .map_err(|e| store_error("Listing summaries", e))?;

    let payload: Vec<StudyRecordPayload> = records.into_iter().map(Into::into).collect();
    Ok(Json(payload))
}

/// Delete one of the requesting user's study records.
///
/// A record owned by someone else and a record that does not exist get the
/// same response, so the endpoint reveals nothing about other users' data.
#[utoipa::path(
    delete,
    path = "/summaries/{id}",
    params(
        ("id" = Uuid, Path, description = "The study record to delete")
    ),
    responses(
        (status = 200, description = "Record deleted", body = DeleteResponse),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Record not found")
    )
)]
pub async fn delete_summary_handler(
    State(state): State<Arc<AppState>>,
    Extension(user_id): Extension<Uuid>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state
        .db
        .delete_record(id, user_id)
        .await
        .map_err(|e| store_error("Study record", e))?;

    Ok(Json(DeleteResponse { success: true }))
}
