//! Interview Prep — company review and interview process research over the
//! search provider.
//!
//! Two independent request/parse cycles, each decoded strictly: these are
//! single-record schemas, so any missing required field aborts the whole
//! operation with a clear reason instead of returning a partial record.
//! Citations from each response are merged into that record's `sources`.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatMessage, SEARCH_MODEL};
use crate::parser::extract_json;

pub mod handlers;
pub mod prompts;

const RESEARCH_TEMPERATURE: f32 = 0.7;

/// Aggregated employee-review ratings for a company. Ratings are 0.0–5.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyReview {
    pub overall_rating: f32,
    pub work_life_balance: f32,
    pub compensation: f32,
    pub career_growth: f32,
    pub culture: f32,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    #[serde(default)]
    pub additional_metrics: HashMap<String, f32>,
    pub last_updated: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Interview process details for a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewProcess {
    pub role: String,
    pub difficulty: f32,
    pub duration: String,
    pub stages: Vec<String>,
    pub common_questions: Vec<String>,
    pub tips: Vec<String>,
    pub last_updated: String,
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Composite research result returned to the caller.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyPrep {
    pub company_review: CompanyReview,
    pub interview_process: InterviewProcess,
}

pub struct InterviewPrep {
    backend: Arc<dyn ChatBackend>,
}

impl InterviewPrep {
    pub fn new(backend: Arc<dyn ChatBackend>) -> Self {
        Self { backend }
    }

    pub async fn research(&self, company_url: &str) -> Result<CompanyPrep, AppError> {
        let company_review: CompanyReview = self
            .fetch_record(
                prompts::REVIEW_SYSTEM,
                &prompts::REVIEW_PROMPT_TEMPLATE.replace("{company_url}", company_url),
                "company review",
            )
            .await?;

        let interview_process: InterviewProcess = self
            .fetch_record(
                prompts::INTERVIEW_SYSTEM,
                &prompts::INTERVIEW_PROMPT_TEMPLATE.replace("{company_url}", company_url),
                "interview process",
            )
            .await?;

        info!(
            "Interview prep for {company_url}: review rated {:.1}, {} interview stages",
            company_review.overall_rating,
            interview_process.stages.len()
        );

        Ok(CompanyPrep {
            company_review,
            interview_process,
        })
    }

    /// One request/parse cycle with strict decode. The provider's citations
    /// are attached to the record's `sources` before decoding completes.
    async fn fetch_record<T>(
        &self,
        system: &str,
        prompt: &str,
        label: &str,
    ) -> Result<T, AppError>
    where
        T: DeserializeOwned,
    {
        let messages = [ChatMessage::system(system), ChatMessage::user(prompt)];
        let response = self
            .backend
            .send(&messages, SEARCH_MODEL, RESEARCH_TEMPERATURE)
            .await
            .map_err(AppError::Llm)?;

        let mut value = extract_json(&response.content)
            .map_err(|e| AppError::NoData(format!("Could not parse {label}: {e}")))?;

        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "sources".to_string(),
                serde_json::to_value(&response.citations)
                    .unwrap_or(serde_json::Value::Array(vec![])),
            );
        }

        serde_json::from_value(value)
            .map_err(|e| AppError::NoData(format!("Incomplete {label} record: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{LlmError, RawResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct QueueBackend(Mutex<VecDeque<Result<RawResponse, LlmError>>>);

    impl QueueBackend {
        fn new(replies: Vec<Result<RawResponse, LlmError>>) -> Arc<Self> {
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
            self.0
                .lock()
                .unwrap()
                .pop_front()
                .expect("backend called more times than scripted")
        }
    }

    fn review_json() -> String {
        json!({
            "overall_rating": 4.2,
            "work_life_balance": 4.0,
            "compensation": 4.5,
            "career_growth": 4.3,
            "culture": 4.1,
            "pros": ["Good pay"],
            "cons": ["Long hours"],
            "additional_metrics": {"diversity": 3.9},
            "last_updated": "2024-01-31"
        })
        .to_string()
    }

    fn interview_json() -> String {
        json!({
            "role": "Data Scientist",
            "difficulty": 3.8,
            "duration": "3 weeks",
            "stages": ["Phone screen", "Onsite"],
            "common_questions": ["Tell me about a project"],
            "tips": ["Review SQL"],
            "last_updated": "2024-01-31"
        })
        .to_string()
    }

    fn with_citations(content: String, citations: &[&str]) -> RawResponse {
        RawResponse {
            content,
            citations: citations.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_research_merges_citations_into_sources() {
        let backend = QueueBackend::new(vec![
            Ok(with_citations(
                review_json(),
                &["https://reviews.example.com"],
            )),
            Ok(with_citations(
                interview_json(),
                &["https://interviews.example.com"],
            )),
        ]);
        let prep = InterviewPrep::new(backend);

        let result = prep.research("https://acme.example.com").await.unwrap();
        assert_eq!(
            result.company_review.sources,
            vec!["https://reviews.example.com".to_string()]
        );
        assert_eq!(
            result.interview_process.sources,
            vec!["https://interviews.example.com".to_string()]
        );
        assert!((result.company_review.overall_rating - 4.2).abs() < f32::EPSILON);
        assert_eq!(result.interview_process.stages.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_required_field_fails_whole_operation() {
        // Review is missing `culture`; no partial record may escape.
        let incomplete = json!({
            "overall_rating": 4.2,
            "work_life_balance": 4.0,
            "compensation": 4.5,
            "career_growth": 4.3,
            "pros": [],
            "cons": [],
            "last_updated": "2024-01-31"
        })
        .to_string();
        let backend = QueueBackend::new(vec![Ok(with_citations(incomplete, &[]))]);
        let prep = InterviewPrep::new(backend);

        let err = prep.research("https://acme.example.com").await.unwrap_err();
        assert!(matches!(err, AppError::NoData(_)));
    }

    #[tokio::test]
    async fn test_unparseable_review_fails_before_second_call() {
        let backend = QueueBackend::new(vec![Ok(with_citations(
            "no structured data".to_string(),
            &[],
        ))]);
        let prep = InterviewPrep::new(backend);

        let err = prep.research("https://acme.example.com").await.unwrap_err();
        assert!(matches!(err, AppError::NoData(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_surfaces_as_llm_error() {
        let backend = QueueBackend::new(vec![Err(LlmError::RateLimited)]);
        let prep = InterviewPrep::new(backend);

        let err = prep.research("https://acme.example.com").await.unwrap_err();
        assert!(matches!(err, AppError::Llm(_)));
    }

    #[tokio::test]
    async fn test_review_decodes_from_fenced_response() {
        let fenced = format!("```json\n{}\n```", review_json());
        let backend = QueueBackend::new(vec![
            Ok(with_citations(fenced, &[])),
            Ok(with_citations(interview_json(), &[])),
        ]);
        let prep = InterviewPrep::new(backend);

        let result = prep.research("https://acme.example.com").await.unwrap();
        assert_eq!(result.company_review.pros, vec!["Good pay".to_string()]);
    }
}
