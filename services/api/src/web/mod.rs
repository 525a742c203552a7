pub mod auth;
pub mod middleware;
pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible to the binary
// that builds the web server router.
pub use middleware::require_auth;
pub use rest::{
    delete_summary_handler, generate_questions_handler, list_summaries_handler,
    summarize_handler, upload_handler,
};
