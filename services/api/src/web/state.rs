//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use std::sync::Arc;
use study_core::ports::{
    PdfTextService, QuestionGenerationService, StudyStore, SummarizationService,
};

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every external collaborator lives behind a port trait here, so the
/// handlers never touch a concrete client or pool directly.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<dyn StudyStore>,
    pub config: Arc<Config>,
    pub summary_adapter: Arc<dyn SummarizationService>,
    pub question_adapter: Arc<dyn QuestionGenerationService>,
    pub pdf_adapter: Arc<dyn PdfTextService>,
}
