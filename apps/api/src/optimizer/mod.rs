//! Resume Optimizer — staged prompt chain over the generation provider.
//!
//! Flow: extract JD requirements → analyze resume against JD →
//!       (optional) rewrite the resume → summarize the changes.
//!
//! Requirement extraction is supplementary: a parse failure there degrades
//! to an empty list rather than failing the whole report. The free-text
//! stages are hard failures.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatMessage, GENERATION_MODEL};
use crate::parser::{extract_json, string_list};

pub mod handlers;
pub mod prompts;

const OPTIMIZER_TEMPERATURE: f32 = 0.3;

/// Composite result of one optimization run.
#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub requirements: Vec<String>,
    pub analysis: String,
    pub rewritten_resume: Option<String>,
    pub change_summary: Option<String>,
}

pub struct ResumeOptimizer {
    backend: Arc<dyn ChatBackend>,
}

impl ResumeOptimizer {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    /// Runs the optimization chain. With `rewrite` set, the chain continues
    /// into rewriting the resume and summarizing what changed.
    pub async fn analyze(
        &self,
        resume_text: &str,
        job_description: &str,
        rewrite: bool,
    ) -> Result<OptimizationReport, AppError> {
        // Stage 1: requirement extraction (JSON list, best-effort).
        let requirements = self.extract_requirements(job_description).await;
        info!("Extracted {} JD requirements", requirements.len());

        // Stage 2: analysis (free text, hard failure).
        let analysis_prompt = prompts::ANALYSIS_PROMPT_TEMPLATE
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description);
        let analysis = self.complete(&analysis_prompt).await?;

        // Stages 3–4: rewrite and change summary, only when requested.
        let (rewritten_resume, change_summary) = if rewrite {
            let rewrite_prompt = prompts::REWRITE_PROMPT_TEMPLATE
                .replace("{resume_text}", resume_text)
                .replace("{job_description}", job_description)
                .replace("{analysis}", &analysis);
            let rewritten = self.complete(&rewrite_prompt).await?;

            let summary_prompt = prompts::SUMMARY_PROMPT_TEMPLATE
                .replace("{original}", resume_text)
                .replace("{rewritten}", &rewritten);
            let summary = self.complete(&summary_prompt).await?;

            (Some(rewritten), Some(summary))
        } else {
            (None, None)
        };

        Ok(OptimizationReport {
            requirements,
            analysis,
            rewritten_resume,
            change_summary,
        })
    }

    /// Regenerates an analysis (or rewrite) with user feedback appended as a
    /// context block to the same prompt.
    pub async fn refine(
        &self,
        resume_text: &str,
        job_description: &str,
        previous_output: &str,
        feedback: &str,
    ) -> Result<String, AppError> {
        let mut prompt = prompts::ANALYSIS_PROMPT_TEMPLATE
            .replace("{resume_text}", resume_text)
            .replace("{job_description}", job_description);
        prompt.push_str(
            &prompts::FEEDBACK_CONTEXT_TEMPLATE
                .replace("{previous_output}", previous_output)
                .replace("{feedback}", feedback),
        );
        self.complete(&prompt).await
    }

    async fn extract_requirements(&self, job_description: &str) -> Vec<String> {
        let prompt =
            prompts::REQUIREMENTS_PROMPT_TEMPLATE.replace("{job_description}", job_description);
        let messages = [
            ChatMessage::system(prompts::REQUIREMENTS_SYSTEM),
            ChatMessage::user(prompt),
        ];

        let response = match self
            .backend
            .send(&messages, GENERATION_MODEL, OPTIMIZER_TEMPERATURE)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Requirement extraction call failed: {e}");
                return Vec::new();
            }
        };

        match extract_json(&response.content) {
            Ok(value) => string_list(&value),
            Err(e) => {
                warn!("Requirement extraction parse failed: {e}");
                Vec::new()
            }
        }
    }

    async fn complete(&self, prompt: &str) -> Result<String, AppError> {
        let messages = [ChatMessage::user(prompt)];
        let response = self
            .backend
            .send(&messages, GENERATION_MODEL, OPTIMIZER_TEMPERATURE)
            .await?;
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{LlmError, RawResponse};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct QueueBackend(Mutex<VecDeque<Result<String, LlmError>>>);

    impl QueueBackend {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self(Mutex::new(replies.into_iter().collect())))
        }
    }

    #[async_trait]
    impl ChatBackend for QueueBackend {
        async fn send(
            &self,
            _messages: &[ChatMessage],
            _model: &str,
            _temperature: f32,
        ) -> Result<RawResponse, LlmError> {
            let reply = self
                .0
                .lock()
                .unwrap()
                .pop_front()
                .expect("backend called more times than scripted");
            reply.map(|content| RawResponse {
                content,
                citations: vec![],
            })
        }
    }

    #[tokio::test]
    async fn test_analyze_without_rewrite_runs_two_stages() {
        let backend = QueueBackend::new(vec![
            Ok(r#"["5+ years Python", "SQL"]"#.to_string()),
            Ok("Strong fit overall.".to_string()),
        ]);
        let optimizer = ResumeOptimizer::new(backend);

        let report = optimizer.analyze("resume", "jd", false).await.unwrap();
        assert_eq!(report.requirements, vec!["5+ years Python", "SQL"]);
        assert_eq!(report.analysis, "Strong fit overall.");
        assert!(report.rewritten_resume.is_none());
        assert!(report.change_summary.is_none());
    }

    #[tokio::test]
    async fn test_analyze_with_rewrite_runs_full_chain() {
        let backend = QueueBackend::new(vec![
            Ok(r#"["SQL"]"#.to_string()),
            Ok("analysis".to_string()),
            Ok("rewritten resume".to_string()),
            Ok("- reordered skills".to_string()),
        ]);
        let optimizer = ResumeOptimizer::new(backend);

        let report = optimizer.analyze("resume", "jd", true).await.unwrap();
        assert_eq!(report.rewritten_resume.as_deref(), Some("rewritten resume"));
        assert_eq!(report.change_summary.as_deref(), Some("- reordered skills"));
    }

    #[tokio::test]
    async fn test_requirement_parse_failure_degrades_to_empty_list() {
        let backend = QueueBackend::new(vec![
            Ok("I couldn't find any requirements, sorry!".to_string()),
            Ok("analysis".to_string()),
        ]);
        let optimizer = ResumeOptimizer::new(backend);

        let report = optimizer.analyze("resume", "jd", false).await.unwrap();
        assert!(report.requirements.is_empty());
        assert_eq!(report.analysis, "analysis");
    }

    #[tokio::test]
    async fn test_analysis_transport_failure_is_hard() {
        let backend = QueueBackend::new(vec![
            Ok(r#"[]"#.to_string()),
            Err(LlmError::RateLimited),
        ]);
        let optimizer = ResumeOptimizer::new(backend);

        let err = optimizer.analyze("resume", "jd", false).await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_refine_appends_feedback_context() {
        struct CapturingBackend(Mutex<Vec<String>>);

        #[async_trait]
        impl ChatBackend for CapturingBackend {
            async fn send(
                &self,
                messages: &[ChatMessage],
                _model: &str,
                _temperature: f32,
            ) -> Result<RawResponse, LlmError> {
                self.0
                    .lock()
                    .unwrap()
                    .push(messages.last().unwrap().content.clone());
                Ok(RawResponse {
                    content: "refined".to_string(),
                    citations: vec![],
                })
            }
        }

        let backend = Arc::new(CapturingBackend(Mutex::new(Vec::new())));
        let optimizer = ResumeOptimizer::new(backend.clone());

        let result = optimizer
            .refine("resume", "jd", "old analysis", "focus on leadership")
            .await
            .unwrap();
        assert_eq!(result, "refined");

        let prompt = backend.0.lock().unwrap()[0].clone();
        assert!(prompt.contains("old analysis"));
        assert!(prompt.contains("focus on leadership"));
    }
}
