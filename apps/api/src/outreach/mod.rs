//! Outreach Generator — drafts personalized application messages over the
//! generation provider. Single-record semantics: a failure is total, never
//! a partially-populated message.

use std::sync::Arc;

use serde::Deserialize;

use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatMessage, GENERATION_MODEL};

pub mod handlers;
pub mod prompts;

const OUTREACH_TEMPERATURE: f32 = 0.7;

/// Fallback addressee when the user doesn't know a contact name.
const DEFAULT_CONTACT: &str = "[Hiring Manager]";

#[derive(Debug, Clone, Deserialize)]
pub struct OutreachRequest {
    pub company_name: String,
    #[serde(default)]
    pub contact_name: Option<String>,
    pub role: String,
    pub background: String,
    #[serde(default)]
    pub interests: String,
}

pub struct OutreachManager {
    backend: Arc<dyn ChatBackend>,
}

impl OutreachManager {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub async fn generate(&self, request: &OutreachRequest) -> Result<String, AppError> {
        self.complete(&self.build_prompt(request)).await
    }

    /// Regenerates the message with user feedback appended as a context block.
    pub async fn refine(
        &self,
        request: &OutreachRequest,
        previous_message: &str,
        feedback: &str,
    ) -> Result<String, AppError> {
        let mut prompt = self.build_prompt(request);
        prompt.push_str(
            &prompts::FEEDBACK_CONTEXT_TEMPLATE
                .replace("{previous_output}", previous_message)
                .replace("{feedback}", feedback),
        );
        self.complete(&prompt).await
    }

    fn build_prompt(&self, request: &OutreachRequest) -> String {
        let contact = request
            .contact_name
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(DEFAULT_CONTACT);
        prompts::OUTREACH_PROMPT_TEMPLATE
            .replace("{company_name}", &request.company_name)
            .replace("{contact_name}", contact)
            .replace("{role}", &request.role)
            .replace("{background}", &request.background)
            .replace("{interests}", &request.interests)
    }

    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let messages = [ChatMessage::user(prompt)];
        let response = self
            .backend
            .send(&messages, GENERATION_MODEL, OUTREACH_TEMPERATURE)
            .await?;
        Ok(response.content)
    }
}
