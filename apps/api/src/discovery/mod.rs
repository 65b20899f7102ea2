//! Job Discovery Engine — drives preference extraction, primary search, and
//! fallback search, and normalizes the listings the model returns.
//!
//! Search state machine per request:
//! `START → PRIMARY_SEARCH → (valid listings: DONE)
//!                         | (empty/parse-failure: FALLBACK_SEARCH → DONE | DONE-EMPTY)`
//!
//! The fallback transition fires only when normalization yields zero valid
//! listings AND the configuration opts in: an empty primary result is treated
//! as inconclusive, not authoritative. Every request updates the active
//! configuration's metrics exactly once, including elapsed wall-clock time.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{ChatBackend, ChatMessage, GENERATION_MODEL};
use crate::parser::{ensure_array, extract_json, extract_json_or_reformat, string_list};
use crate::search_config::{RunOutcome, SearchConfigStore, SearchConfiguration};

pub mod handlers;
pub mod prompts;

/// Company names that mean the model gave up. Listings carrying one of these
/// (case-insensitive) are dropped before reaching the caller. Fixed list —
/// making it configurable bought nothing for the cases observed in practice.
const PLACEHOLDER_COMPANIES: [&str; 4] = ["", "n/a", "unknown", "unknown company"];

/// How much hotter the fallback search runs than the primary, capped at 1.0.
const FALLBACK_TEMPERATURE_BOOST: f32 = 0.2;

const PREFERENCES_TEMPERATURE: f32 = 0.3;
const COMPANY_TEMPERATURE: f32 = 0.7;

// ────────────────────────────────────────────────────────────────────────────
// Records
// ────────────────────────────────────────────────────────────────────────────

/// A normalized job listing. All fields are populated; `requirements` is
/// always a list and `link` always carries an http(s) scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub link: String,
    pub posted_date: String,
    pub salary: String,
}

/// Job preferences extracted from a resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub role_level: String,
    #[serde(default)]
    pub preferred_companies: Vec<String>,
    #[serde(default)]
    pub education: Education,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
}

/// A company profile with every field defaulted when the source omits it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub founding_year: String,
    pub size: String,
    pub funding: String,
    pub financial_performance: String,
    pub headquarters: String,
}

/// Result of a company lookup. A lookup may disambiguate into several
/// records; callers branch on the variant, never on a sentinel.
/// Serializes as the bare object, `{"companies": [...]}`, or `{}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompanyInfo {
    Multiple { companies: Vec<CompanyRecord> },
    Single(CompanyRecord),
    Empty {},
}

/// Which state the search machine finished in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchSource {
    Primary,
    Fallback,
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub jobs: Vec<JobListing>,
    pub source: SearchSource,
    pub config: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Engine
// ────────────────────────────────────────────────────────────────────────────

/// The discovery engine. Holds the search-provider backend for job and
/// company lookups, the generation-provider backend for preference
/// extraction, and the configuration store for prompts and metrics.
pub struct DiscoveryEngine {
    search: Arc<dyn ChatBackend>,
    generation: Arc<dyn ChatBackend>,
    store: Arc<SearchConfigStore>,
}

impl DiscoveryEngine {
    pub fn new(
        search: Arc<dyn ChatBackend>,
        generation: Arc<dyn ChatBackend>,
        store: Arc<SearchConfigStore>,
    ) -> Self {
        Self {
            search,
            generation,
            store,
        }
    }

    /// Runs one search request through the state machine. `config_name`
    /// overrides the active configuration when given.
    pub async fn search_jobs(
        &self,
        background: &str,
        criteria: &str,
        config_name: Option<&str>,
    ) -> Result<SearchResponse, AppError> {
        let config = match config_name {
            Some(name) => self.store.get(name).await?,
            None => self.store.active().await,
        };
        let started = Instant::now();

        // PRIMARY_SEARCH
        let primary = self.run_search_call(&config, background, criteria, false).await;

        let (jobs, source) = match primary {
            Ok(jobs) if !jobs.is_empty() => (jobs, SearchSource::Primary),
            outcome => {
                if let Err(e) = &outcome {
                    warn!("Primary search failed: {e}");
                }
                if !config.use_fallback {
                    // DONE-EMPTY without fallback: an error still surfaces,
                    // an empty result is returned as-is.
                    self.finish_run(&config.name, 0, started).await;
                    return match outcome {
                        Ok(_) => Ok(SearchResponse {
                            jobs: Vec::new(),
                            source: SearchSource::None,
                            config: config.name,
                        }),
                        Err(e) => Err(e),
                    };
                }

                // FALLBACK_SEARCH — empty primary is inconclusive, so ask
                // again with the best-effort prompt at a higher temperature.
                info!("No valid jobs from primary search, attempting fallback");
                match self.run_search_call(&config, background, criteria, true).await {
                    Ok(jobs) if !jobs.is_empty() => (jobs, SearchSource::Fallback),
                    Ok(_) => (Vec::new(), SearchSource::None),
                    Err(e) => {
                        // DONE-EMPTY: fallback failure degrades to an empty
                        // result rather than erroring the whole request.
                        warn!("Fallback search failed: {e}");
                        (Vec::new(), SearchSource::None)
                    }
                }
            }
        };

        self.finish_run(&config.name, jobs.len(), started).await;
        info!(
            "Search via '{}' returned {} listings (source: {:?})",
            config.name,
            jobs.len(),
            source
        );
        Ok(SearchResponse {
            jobs,
            source,
            config: config.name,
        })
    }

    /// One gateway call plus parse and normalization. A parse failure is an
    /// empty result here — the caller decides whether that triggers fallback.
    async fn run_search_call(
        &self,
        config: &SearchConfiguration,
        background: &str,
        criteria: &str,
        fallback: bool,
    ) -> Result<Vec<JobListing>, AppError> {
        let (messages, temperature) = if fallback {
            let criteria = if criteria.trim().is_empty() {
                "None specified"
            } else {
                criteria
            };
            let prompt = prompts::FALLBACK_PROMPT_TEMPLATE
                .replace("{background}", background)
                .replace("{criteria}", criteria);
            (
                vec![
                    ChatMessage::system(prompts::FALLBACK_SYSTEM),
                    ChatMessage::user(prompt),
                ],
                (config.temperature + FALLBACK_TEMPERATURE_BOOST).min(1.0),
            )
        } else {
            (
                vec![
                    ChatMessage::system(config.system_prompt.as_str()),
                    ChatMessage::user(config.format_user_prompt(background, criteria)),
                ],
                config.temperature,
            )
        };

        let response = self
            .search
            .send(&messages, &config.model, temperature)
            .await
            .map_err(AppError::Llm)?;

        let value = match extract_json(&response.content) {
            Ok(value) => value,
            Err(e) => {
                warn!("Job listing parse failed, treating as empty result: {e}");
                return Ok(Vec::new());
            }
        };

        Ok(ensure_array(value)
            .iter()
            .filter_map(normalize_job)
            .collect())
    }

    /// Records the run outcome exactly once. Success means at least one
    /// valid listing survived normalization.
    async fn finish_run(&self, config_name: &str, jobs_returned: usize, started: Instant) {
        let outcome = RunOutcome {
            success: jobs_returned > 0,
            jobs_returned,
            response_time_secs: started.elapsed().as_secs_f64(),
        };
        if let Err(e) = self.store.record_run(config_name, &outcome).await {
            warn!("Failed to record search metrics for '{config_name}': {e}");
        }
    }

    /// Extracts job preferences from resume text. Returns `None` on any
    /// transport or parse failure — the caller decides the messaging.
    pub async fn extract_preferences(&self, resume_text: &str) -> Option<Preferences> {
        let prompt = prompts::PREFERENCES_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);
        let messages = [
            ChatMessage::system(crate::llm_client::prompts::JSON_ONLY_SYSTEM),
            ChatMessage::user(prompt),
        ];

        let response = match self
            .generation
            .send(&messages, GENERATION_MODEL, PREFERENCES_TEMPERATURE)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Preference extraction call failed: {e}");
                return None;
            }
        };

        let value = match extract_json(&response.content) {
            Ok(v) => v,
            Err(e) => {
                warn!("Preference extraction parse failed: {e}");
                return None;
            }
        };

        match serde_json::from_value::<Preferences>(value) {
            Ok(preferences) => Some(preferences),
            Err(e) => {
                warn!("Preference record decode failed: {e}");
                None
            }
        }
    }

    /// Looks up company information by name. Total failure yields
    /// `CompanyInfo::Empty` — never an error — to keep caller branching flat.
    pub async fn get_company_info(&self, company_name: &str) -> CompanyInfo {
        let prompt = prompts::COMPANY_PROMPT_TEMPLATE.replace("{company}", company_name);
        let messages = [
            ChatMessage::system(prompts::COMPANY_SYSTEM),
            ChatMessage::user(prompt),
        ];

        let config = self.store.active().await;
        let response = match self
            .search
            .send(&messages, &config.model, COMPANY_TEMPERATURE)
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Company lookup call failed: {e}");
                return CompanyInfo::Empty {};
            }
        };

        let value = match extract_json_or_reformat(
            self.search.as_ref(),
            &config.model,
            &response.content,
            prompts::COMPANY_SCHEMA_HINT,
        )
        .await
        {
            Ok(v) => v,
            Err(e) => {
                warn!("Company lookup parse failed: {e}");
                return CompanyInfo::Empty {};
            }
        };

        normalize_company_info(value)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Normalization
// ────────────────────────────────────────────────────────────────────────────

/// Validates and normalizes one job candidate. Returns `None` when a
/// required field is missing or the company name is a placeholder.
pub fn normalize_job(value: &Value) -> Option<JobListing> {
    let title = value.get("title")?.as_str()?.trim().to_string();
    let company = value.get("company")?.as_str()?.trim().to_string();
    let location = value.get("location")?.as_str()?.trim().to_string();
    let description = value.get("description")?.as_str()?.trim().to_string();
    let requirements = string_list(value.get("requirements")?);
    let link = normalize_link(value.get("link")?.as_str()?.trim());

    if PLACEHOLDER_COMPANIES.contains(&company.to_lowercase().as_str()) {
        return None;
    }

    Some(JobListing {
        title,
        company,
        location,
        description,
        requirements,
        link,
        posted_date: field_or(value, "posted_date", "Unknown"),
        salary: field_or(value, "salary", "Not specified"),
    })
}

/// Prepends `https://` to links missing a scheme. Idempotent.
pub fn normalize_link(link: &str) -> String {
    if link.starts_with("http://") || link.starts_with("https://") {
        link.to_string()
    } else {
        format!("https://{link}")
    }
}

fn field_or(value: &Value, key: &str, default: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        _ => default.to_string(),
    }
}

fn normalize_company_info(value: Value) -> CompanyInfo {
    match value {
        Value::Array(items) => CompanyInfo::Multiple {
            companies: items
                .iter()
                .filter(|v| v.is_object())
                .map(normalize_company)
                .collect(),
        },
        Value::Object(_) => CompanyInfo::Single(normalize_company(&value)),
        _ => CompanyInfo::Empty {},
    }
}

fn normalize_company(value: &Value) -> CompanyRecord {
    CompanyRecord {
        name: field_or(value, "name", "Unknown"),
        founding_year: field_or(value, "founding_year", "N/A"),
        size: field_or(value, "size", "N/A"),
        funding: field_or(value, "funding", "N/A"),
        financial_performance: field_or(value, "financial_performance", "N/A"),
        headquarters: field_or(value, "headquarters", "N/A"),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{LlmError, RawResponse};
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Backend that plays back a queue of canned replies and records the
    /// temperature of every call it sees.
    struct QueueBackend {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
        temperatures: Mutex<Vec<f32>>,
    }

    impl QueueBackend {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into_iter().collect()),
                temperatures: Mutex::new(Vec::new()),
            })
        }

        fn calls_made(&self) -> usize {
            self.temperatures.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl ChatBackend for QueueBackend {
        async fn send(
            &self,
            _messages: &[ChatMessage],
            _model: &str,
            temperature: f32,
        ) -> Result<RawResponse, LlmError> {
            self.temperatures.lock().unwrap().push(temperature);
            let reply = self
                .replies
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

    fn job_json(title: &str, company: &str) -> String {
        json!([{
            "title": title,
            "company": company,
            "location": "Remote",
            "description": "desc",
            "requirements": ["SQL"],
            "link": "https://example.com/job",
        }])
        .to_string()
    }

    fn engine_with(
        search: Arc<QueueBackend>,
    ) -> (DiscoveryEngine, Arc<SearchConfigStore>, tempfile::TempDir) {
        let dir = tempdir().unwrap();
        let store = Arc::new(SearchConfigStore::load(dir.path().join("configs.json")));
        let generation = QueueBackend::new(vec![]);
        let engine = DiscoveryEngine::new(search, generation, store.clone());
        (engine, store, dir)
    }

    // ── normalization ───────────────────────────────────────────────────────

    #[test]
    fn test_normalize_job_drops_missing_required_fields() {
        let missing_link = json!({
            "title": "Analyst",
            "company": "Acme",
            "location": "NYC",
            "description": "desc",
            "requirements": ["SQL"],
        });
        assert!(normalize_job(&missing_link).is_none());
    }

    #[test]
    fn test_normalize_job_drops_placeholder_companies() {
        for company in ["", "N/A", "unknown", "Unknown Company", "UNKNOWN"] {
            let candidate = json!({
                "title": "Analyst",
                "company": company,
                "location": "NYC",
                "description": "desc",
                "requirements": [],
                "link": "https://example.com",
            });
            assert!(
                normalize_job(&candidate).is_none(),
                "placeholder '{company}' should be dropped"
            );
        }
    }

    #[test]
    fn test_normalize_job_wraps_scalar_requirements() {
        let candidate = json!({
            "title": "Analyst",
            "company": "Acme",
            "location": "NYC",
            "description": "desc",
            "requirements": "3+ years SQL",
            "link": "https://example.com",
        });
        let job = normalize_job(&candidate).unwrap();
        assert_eq!(job.requirements, vec!["3+ years SQL".to_string()]);
    }

    #[test]
    fn test_normalize_job_defaults_non_list_requirements_to_empty() {
        let candidate = json!({
            "title": "Analyst",
            "company": "Acme",
            "location": "NYC",
            "description": "desc",
            "requirements": 7,
            "link": "https://example.com",
        });
        let job = normalize_job(&candidate).unwrap();
        assert!(job.requirements.is_empty());
    }

    #[test]
    fn test_normalize_job_defaults_optional_fields() {
        let candidate = json!({
            "title": "Analyst",
            "company": "Acme",
            "location": "NYC",
            "description": "desc",
            "requirements": [],
            "link": "example.com/careers",
        });
        let job = normalize_job(&candidate).unwrap();
        assert_eq!(job.posted_date, "Unknown");
        assert_eq!(job.salary, "Not specified");
        assert_eq!(job.link, "https://example.com/careers");
    }

    #[test]
    fn test_normalize_link_is_idempotent() {
        assert_eq!(normalize_link("example.com"), "https://example.com");
        assert_eq!(
            normalize_link(&normalize_link("example.com")),
            "https://example.com"
        );
        assert_eq!(normalize_link("http://example.com"), "http://example.com");
    }

    // ── search state machine ────────────────────────────────────────────────

    #[tokio::test]
    async fn test_primary_success_skips_fallback() {
        let search = QueueBackend::new(vec![Ok(job_json("Analyst", "Acme"))]);
        let (engine, store, _dir) = engine_with(search.clone());

        let response = engine.search_jobs("python dev", "", None).await.unwrap();
        assert_eq!(response.source, SearchSource::Primary);
        assert_eq!(response.jobs.len(), 1);
        assert_eq!(search.calls_made(), 1);

        let metrics = store.active().await.metrics;
        assert_eq!(metrics.total_runs, 1);
        assert_eq!(metrics.successful_runs, 1);
        assert!((metrics.average_jobs_returned - 1.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_primary_triggers_fallback_exactly_once() {
        let search = QueueBackend::new(vec![
            Ok("[]".to_string()),
            Ok(job_json("ML Engineer", "Initech")),
        ]);
        let (engine, store, _dir) = engine_with(search.clone());

        let response = engine.search_jobs("ml background", "", None).await.unwrap();
        assert_eq!(response.source, SearchSource::Fallback);
        assert_eq!(response.jobs[0].company, "Initech");
        assert_eq!(search.calls_made(), 2);

        // Fallback runs hotter than the configured primary temperature.
        let temps = search.temperatures.lock().unwrap().clone();
        assert!(temps[1] > temps[0]);

        // Metrics recorded once, not once per phase.
        assert_eq!(store.active().await.metrics.total_runs, 1);
    }

    #[tokio::test]
    async fn test_unparseable_primary_counts_as_empty_and_falls_back() {
        let search = QueueBackend::new(vec![
            Ok("sorry, I couldn't find anything structured".to_string()),
            Ok(job_json("Analyst", "Acme")),
        ]);
        let (engine, _store, _dir) = engine_with(search.clone());

        let response = engine.search_jobs("bg", "", None).await.unwrap();
        assert_eq!(response.source, SearchSource::Fallback);
        assert_eq!(search.calls_made(), 2);
    }

    #[tokio::test]
    async fn test_fallback_disabled_returns_empty_without_second_call() {
        let search = QueueBackend::new(vec![Ok("[]".to_string())]);
        let (engine, store, _dir) = engine_with(search.clone());
        store
            .create(crate::search_config::NewConfiguration {
                name: "strict".to_string(),
                description: String::new(),
                system_prompt: "sys".to_string(),
                user_prompt_template: "{background} {criteria}".to_string(),
                model: "sonar".to_string(),
                temperature: 0.3,
                use_fallback: false,
            })
            .await
            .unwrap();

        let response = engine.search_jobs("bg", "", Some("strict")).await.unwrap();
        assert_eq!(response.source, SearchSource::None);
        assert!(response.jobs.is_empty());
        assert_eq!(search.calls_made(), 1);

        let metrics = store.get("strict").await.unwrap().metrics;
        assert_eq!(metrics.total_runs, 1);
        assert_eq!(metrics.successful_runs, 0);
    }

    #[tokio::test]
    async fn test_all_placeholder_listings_trigger_fallback() {
        let search = QueueBackend::new(vec![
            Ok(job_json("Analyst", "Unknown Company")),
            Ok(job_json("Analyst", "Acme")),
        ]);
        let (engine, _store, _dir) = engine_with(search.clone());

        let response = engine.search_jobs("bg", "", None).await.unwrap();
        assert_eq!(response.source, SearchSource::Fallback);
        assert_eq!(response.jobs[0].company, "Acme");
    }

    #[tokio::test]
    async fn test_fallback_failure_degrades_to_empty() {
        let search = QueueBackend::new(vec![
            Ok("[]".to_string()),
            Err(LlmError::RateLimited),
        ]);
        let (engine, store, _dir) = engine_with(search.clone());

        let response = engine.search_jobs("bg", "", None).await.unwrap();
        assert_eq!(response.source, SearchSource::None);
        assert!(response.jobs.is_empty());
        assert_eq!(store.active().await.metrics.total_runs, 1);
    }

    #[tokio::test]
    async fn test_unknown_config_name_is_an_error() {
        let search = QueueBackend::new(vec![]);
        let (engine, _store, _dir) = engine_with(search);
        let err = engine.search_jobs("bg", "", Some("missing")).await.unwrap_err();
        assert!(matches!(err, AppError::Store(_)));
    }

    // ── company lookup ──────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_company_array_wraps_as_companies_with_defaults() {
        let search = QueueBackend::new(vec![Ok(json!([
            {"name": "Acme", "size": "200"},
            {"founding_year": 2014}
        ])
        .to_string())]);
        let (engine, _store, _dir) = engine_with(search);

        let info = engine.get_company_info("acme").await;
        match info {
            CompanyInfo::Multiple { companies } => {
                assert_eq!(companies.len(), 2);
                assert_eq!(companies[0].name, "Acme");
                assert_eq!(companies[0].founding_year, "N/A");
                assert_eq!(companies[1].name, "Unknown");
                assert_eq!(companies[1].founding_year, "2014");
            }
            other => panic!("expected Multiple, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_company_single_object_returned_directly() {
        let search = QueueBackend::new(vec![Ok(
            json!({"name": "Acme", "headquarters": "SF"}).to_string()
        )]);
        let (engine, _store, _dir) = engine_with(search);

        match engine.get_company_info("acme").await {
            CompanyInfo::Single(record) => {
                assert_eq!(record.name, "Acme");
                assert_eq!(record.headquarters, "SF");
                assert_eq!(record.funding, "N/A");
            }
            other => panic!("expected Single, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_company_total_failure_returns_empty_not_error() {
        let search = QueueBackend::new(vec![Err(LlmError::Auth)]);
        let (engine, _store, _dir) = engine_with(search);
        assert_eq!(engine.get_company_info("acme").await, CompanyInfo::Empty {});
    }

    #[test]
    fn test_company_info_serialization_shapes() {
        let single = CompanyInfo::Single(normalize_company(&json!({"name": "Acme"})));
        let v = serde_json::to_value(&single).unwrap();
        assert_eq!(v["name"], "Acme");

        let multiple = CompanyInfo::Multiple {
            companies: vec![normalize_company(&json!({"name": "Acme"}))],
        };
        let v = serde_json::to_value(&multiple).unwrap();
        assert_eq!(v["companies"][0]["name"], "Acme");

        let empty = CompanyInfo::Empty {};
        assert_eq!(serde_json::to_value(&empty).unwrap(), json!({}));
    }

    // ── preferences ─────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_extract_preferences_decodes_record() {
        let generation = QueueBackend::new(vec![Ok(json!({
            "skills": ["Python", "SQL"],
            "industries": ["fintech"],
            "role_level": "senior",
            "preferred_companies": ["startups"],
            "education": {"degree": "MS", "field": "Statistics"}
        })
        .to_string())]);
        let dir = tempdir().unwrap();
        let store = Arc::new(SearchConfigStore::load(dir.path().join("c.json")));
        let engine = DiscoveryEngine::new(QueueBackend::new(vec![]), generation, store);

        let preferences = engine.extract_preferences("resume text").await.unwrap();
        assert_eq!(preferences.skills, vec!["Python", "SQL"]);
        assert_eq!(preferences.education.field, "Statistics");
    }

    #[tokio::test]
    async fn test_extract_preferences_returns_none_on_parse_failure() {
        let generation = QueueBackend::new(vec![Ok("no json here".to_string())]);
        let dir = tempdir().unwrap();
        let store = Arc::new(SearchConfigStore::load(dir.path().join("c.json")));
        let engine = DiscoveryEngine::new(QueueBackend::new(vec![]), generation, store);

        assert!(engine.extract_preferences("resume text").await.is_none());
    }
}
