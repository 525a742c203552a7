pub mod domain;
pub mod extract;
pub mod normalize;
pub mod ports;

pub use domain::{AuthSession, QuestionAnswer, StudyRecord, User, UserCredentials};
pub use extract::{extract_questions, render_questions, ExtractError};
pub use normalize::{normalize, NormalizeError, DEFAULT_MAX_TEXT_LENGTH};
pub use ports::{
    PdfTextService, PortError, PortResult, QuestionGenerationService, StudyStore,
    SummarizationService,
};
