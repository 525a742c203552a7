pub mod db;
pub mod pdf;
pub mod question_llm;
pub mod summary_llm;

pub use db::DbAdapter;
pub use pdf::PdfExtractAdapter;
pub use question_llm::OpenAiQuestionAdapter;
pub use summary_llm::OpenAiSummaryAdapter;
