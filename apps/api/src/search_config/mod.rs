//! Search Configuration Store — named bundles of prompt templates, model
//! parameters, and running success metrics, persisted as a single JSON file.
//!
//! The store is the only writer to the persisted file. Every mutation goes
//! through a single interior lock and is written through atomically
//! (temp-file-then-rename), so a crash can never leave partial JSON behind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub mod handlers;

pub const DEFAULT_CONFIG_NAME: &str = "default";

/// System prompt seeded into the built-in default configuration.
const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant that finds current job openings \
based on candidate background and requirements. \
Return ONLY a JSON array containing relevant job listings that match the candidate's background \
and requirements. \
Ensure all returned jobs are currently open positions and each job is a separate, complete entry. \
Each job MUST have a specific company name and application link.";

/// User prompt template seeded into the built-in default configuration.
/// Placeholders `{background}` and `{criteria}` are filled per search.
const DEFAULT_USER_PROMPT_TEMPLATE: &str = r#"Find current job openings matching the following candidate profile and requirements:

Candidate Background & Preferences:
{background}

Additional Requirements:
{criteria}

Additional Instructions:
1. Return response in this exact JSON format:
[{
  "title": "Job Title",
  "company": "Company Name",
  "location": "Job Location",
  "description": "Brief job description",
  "requirements": ["Requirement 1", "Requirement 2"],
  "link": "Application URL",
  "posted_date": "Posting Date",
  "salary": "Salary range if available"
}]
2. Focus on currently open positions
3. Ensure every job has a specific company name (not N/A or Unknown)
4. Ensure every job has a valid application link
5. If multiple positions exist at one company, create a separate entry for each"#;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate configuration name '{0}'")]
    DuplicateName(String),

    #[error("unknown configuration '{0}'")]
    UnknownConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("atomic rename failed: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Running per-configuration performance counters. Never reset except by
/// deleting the configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchMetrics {
    pub total_runs: u64,
    pub successful_runs: u64,
    pub average_jobs_returned: f64,
    pub average_response_time: f64,
}

impl SearchMetrics {
    /// Incremental running-average update:
    /// `new_avg = (old_avg * old_total + x) / (old_total + 1)`.
    pub fn record(&mut self, outcome: &RunOutcome) {
        let n = self.total_runs as f64;
        self.average_jobs_returned =
            (self.average_jobs_returned * n + outcome.jobs_returned as f64) / (n + 1.0);
        self.average_response_time =
            (self.average_response_time * n + outcome.response_time_secs) / (n + 1.0);
        self.total_runs += 1;
        if outcome.success {
            self.successful_runs += 1;
        }
    }
}

/// Result of one search request, fed into the metrics update exactly once.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub success: bool,
    pub jobs_returned: usize,
    pub response_time_secs: f64,
}

/// A named search configuration: prompt pair, model parameters, and metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfiguration {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    /// Template with `{background}` and `{criteria}` placeholders.
    pub user_prompt_template: String,
    pub model: String,
    pub temperature: f32,
    pub use_fallback: bool,
    #[serde(default)]
    pub metrics: SearchMetrics,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SearchConfiguration {
    pub fn format_user_prompt(&self, background: &str, criteria: &str) -> String {
        let criteria = if criteria.trim().is_empty() {
            "None specified"
        } else {
            criteria
        };
        self.user_prompt_template
            .replace("{background}", background)
            .replace("{criteria}", criteria)
    }
}

/// Fields accepted when creating a configuration. Metrics and timestamps are
/// store-owned.
#[derive(Debug, Clone, Deserialize)]
pub struct NewConfiguration {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub system_prompt: String,
    pub user_prompt_template: String,
    pub model: String,
    pub temperature: f32,
    #[serde(default)]
    pub use_fallback: bool,
}

fn default_configuration() -> SearchConfiguration {
    let now = Utc::now();
    SearchConfiguration {
        name: DEFAULT_CONFIG_NAME.to_string(),
        description: "Built-in default search configuration".to_string(),
        system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        user_prompt_template: DEFAULT_USER_PROMPT_TEMPLATE.to_string(),
        model: crate::llm_client::SEARCH_MODEL.to_string(),
        temperature: 0.5,
        use_fallback: true,
        metrics: SearchMetrics::default(),
        created_at: now,
        updated_at: now,
    }
}

struct Inner {
    configs: HashMap<String, SearchConfiguration>,
    active: String,
}

/// Exclusive owner of all `SearchConfiguration` instances and the only
/// writer to the persisted file.
pub struct SearchConfigStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

impl SearchConfigStore {
    /// Loads the store from `path`. A missing file is seeded with the
    /// built-in default and written out; a corrupt file falls back to
    /// in-memory defaults rather than failing startup.
    pub fn load(path: PathBuf) -> Self {
        let configs = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, SearchConfiguration>>(&raw) {
                Ok(configs) if !configs.is_empty() => {
                    info!("Loaded {} search configurations from {:?}", configs.len(), path);
                    configs
                }
                Ok(_) => {
                    warn!("Search configuration file {path:?} is empty, seeding default");
                    Self::seed(&path)
                }
                Err(e) => {
                    warn!("Search configuration file {path:?} is corrupt ({e}), using in-memory defaults");
                    seeded_map()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No search configuration file at {path:?}, seeding default");
                Self::seed(&path)
            }
            Err(e) => {
                warn!("Failed to read {path:?} ({e}), using in-memory defaults");
                seeded_map()
            }
        };

        let active = if configs.contains_key(DEFAULT_CONFIG_NAME) {
            DEFAULT_CONFIG_NAME.to_string()
        } else {
            // Seeding guarantees at least one entry.
            configs.keys().next().cloned().unwrap_or_default()
        };

        Self {
            path,
            inner: Mutex::new(Inner { configs, active }),
        }
    }

    fn seed(path: &Path) -> HashMap<String, SearchConfiguration> {
        let configs = seeded_map();
        if let Err(e) = persist(path, &configs) {
            warn!("Failed to write seeded configuration file to {path:?}: {e}");
        }
        configs
    }

    pub async fn list(&self) -> Vec<SearchConfiguration> {
        let inner = self.inner.lock().await;
        let mut configs: Vec<_> = inner.configs.values().cloned().collect();
        configs.sort_by(|a, b| a.name.cmp(&b.name));
        configs
    }

    pub async fn get(&self, name: &str) -> Result<SearchConfiguration, StoreError> {
        let inner = self.inner.lock().await;
        inner
            .configs
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::UnknownConfig(name.to_string()))
    }

    /// The currently active configuration. The pointer is validated on every
    /// `set_active`, and seeding guarantees the map is never empty.
    pub async fn active(&self) -> SearchConfiguration {
        let inner = self.inner.lock().await;
        inner
            .configs
            .get(&inner.active)
            .or_else(|| inner.configs.values().next())
            .cloned()
            .unwrap_or_else(default_configuration)
    }

    pub async fn active_name(&self) -> String {
        self.inner.lock().await.active.clone()
    }

    /// Pure in-memory pointer change; the named configuration must exist.
    pub async fn set_active(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.configs.contains_key(name) {
            return Err(StoreError::UnknownConfig(name.to_string()));
        }
        inner.active = name.to_string();
        Ok(())
    }

    /// Creates a configuration. Fails on a duplicate name with the store —
    /// in memory and on disk — left unchanged.
    pub async fn create(&self, new: NewConfiguration) -> Result<SearchConfiguration, StoreError> {
        let mut inner = self.inner.lock().await;
        if inner.configs.contains_key(&new.name) {
            return Err(StoreError::DuplicateName(new.name));
        }

        let now = Utc::now();
        let config = SearchConfiguration {
            name: new.name.clone(),
            description: new.description,
            system_prompt: new.system_prompt,
            user_prompt_template: new.user_prompt_template,
            model: new.model,
            temperature: new.temperature,
            use_fallback: new.use_fallback,
            metrics: SearchMetrics::default(),
            created_at: now,
            updated_at: now,
        };

        // Persist the candidate map before committing it so a failed write
        // leaves the in-memory store untouched.
        let mut candidate = inner.configs.clone();
        candidate.insert(new.name, config.clone());
        persist(&self.path, &candidate)?;
        inner.configs = candidate;
        Ok(config)
    }

    /// Deletes a configuration. Deletion is the only way metrics reset.
    pub async fn delete(&self, name: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().await;
        if !inner.configs.contains_key(name) {
            return Err(StoreError::UnknownConfig(name.to_string()));
        }

        let mut candidate = inner.configs.clone();
        candidate.remove(name);
        if candidate.is_empty() {
            // The store must always hold a valid configuration to run against.
            let default = default_configuration();
            candidate.insert(default.name.clone(), default);
        }
        persist(&self.path, &candidate)?;
        inner.configs = candidate;

        if inner.active == name {
            let next = inner
                .configs
                .keys()
                .next()
                .cloned()
                .unwrap_or_else(|| DEFAULT_CONFIG_NAME.to_string());
            info!("Active configuration '{name}' deleted, switching to '{next}'");
            inner.active = next;
        }
        Ok(())
    }

    /// Applies one run's outcome to the named configuration's metrics,
    /// stamps `updated_at`, and writes the store through to disk.
    pub async fn record_run(
        &self,
        name: &str,
        outcome: &RunOutcome,
    ) -> Result<SearchMetrics, StoreError> {
        let mut inner = self.inner.lock().await;
        let mut candidate = inner.configs.clone();
        let config = candidate
            .get_mut(name)
            .ok_or_else(|| StoreError::UnknownConfig(name.to_string()))?;

        config.metrics.record(outcome);
        config.updated_at = Utc::now();
        let metrics = config.metrics.clone();

        persist(&self.path, &candidate)?;
        inner.configs = candidate;
        Ok(metrics)
    }
}

fn seeded_map() -> HashMap<String, SearchConfiguration> {
    let default = default_configuration();
    HashMap::from([(default.name.clone(), default)])
}

/// Atomic write-through: serialize to a temp file in the target directory,
/// then rename over the real path.
fn persist(path: &Path, configs: &HashMap<String, SearchConfiguration>) -> Result<(), StoreError> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;
    let tmp = tempfile::NamedTempFile::new_in(parent)?;
    serde_json::to_writer_pretty(tmp.as_file(), configs)?;
    tmp.persist(path)?;
    Ok(())
}
