//! services/api/src/adapters/question_llm.rs
//!
//! This module contains the adapter for the practice-question LLM.
//! It implements the `QuestionGenerationService` port from the `core` crate.
//!
//! The `Q<n>:`/`A:` format demanded by the prompt below is a contract with
//! `study_core::extract`; change one and the other must follow.

use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;
use study_core::ports::{PortError, PortResult, QuestionGenerationService};

const QUESTION_PROMPT_TEMPLATE: &str =
    "Generate 3 practice questions based on this summary:\n{summary}\nFormat:\nQ1: [question]\nA: [answer]";

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `QuestionGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiQuestionAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    timeout: Duration,
}

impl OpenAiQuestionAdapter {
    /// Creates a new `OpenAiQuestionAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, timeout: Duration) -> Self {
        Self {
            client,
            model,
            timeout,
        }
    }
}

//=========================================================================================
// `QuestionGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl QuestionGenerationService for OpenAiQuestionAdapter {
    /// Requests practice-question text for a summary. Returns the raw
    /// completion; the caller runs the extractor over it.
    async fn generate_questions(&self, summary: &str) -> PortResult<String> {
        let messages = vec![ChatCompletionRequestUserMessageArgs::default()
            .content(QUESTION_PROMPT_TEMPLATE.replace("{summary}", summary))
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?
            .into()];

        // Answers add bulk, so the output bound is larger than the
        // summarization adapter's.
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(0.7)
            .max_tokens(600u32)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| {
                PortError::Upstream(format!(
                    "Question generation call timed out after {}s",
                    self.timeout.as_secs()
                ))
            })?
            .map_err(|e: OpenAIError| PortError::Upstream(e.to_string()))?;

        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::UpstreamEmpty)
            }
        } else {
            Err(PortError::UpstreamEmpty)
        }
    }
}
