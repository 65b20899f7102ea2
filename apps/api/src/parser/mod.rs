//! Response Parser — recovers structured JSON from free-form model output.
//!
//! LLM output reliably wraps JSON in prose or markdown fences, and the shape
//! varies by model and prompt. A single naive `serde_json::from_str` is not
//! enough, so extraction runs an ordered cascade of strategies. The ordering
//! is a deliberate tie-break policy: the strictest reading of the text wins.

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::llm_client::{ChatBackend, ChatMessage};

pub mod prompts;

/// Temperature for the reformat escalation call. Kept low: the task is
/// transcription, not generation.
const REFORMAT_TEMPERATURE: f32 = 0.2;

/// One extraction strategy in the cascade, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Parse the entire text as JSON.
    Direct,
    /// Parse the contents of a ``` / ```json fenced block.
    Fenced,
    /// Parse the first balanced `[ ... ]` in the text.
    Array,
    /// Parse the first balanced `{ ... }` in the text.
    Object,
    /// Secondary LLM call to reformat the text, then a direct parse.
    Reformat,
}

impl Strategy {
    fn name(self) -> &'static str {
        match self {
            Strategy::Direct => "direct",
            Strategy::Fenced => "fenced-block",
            Strategy::Array => "embedded-array",
            Strategy::Object => "embedded-object",
            Strategy::Reformat => "llm-reformat",
        }
    }
}

/// A single failed extraction attempt.
#[derive(Debug)]
pub struct Attempt {
    pub strategy: Strategy,
    pub reason: String,
}

/// Aggregate failure over every strategy the cascade tried.
#[derive(Debug, Error)]
#[error("JSON extraction failed after {} strategies: {}", .attempts.len(),
    .attempts.iter().map(|a| format!("{}: {}", a.strategy.name(), a.reason))
        .collect::<Vec<_>>().join("; "))]
pub struct ParseError {
    pub attempts: Vec<Attempt>,
}

/// Extracts a JSON value from free-form text using the structural strategies
/// (cascade steps 1–4). First success wins.
pub fn extract_json(text: &str) -> Result<Value, ParseError> {
    let mut attempts = Vec::new();

    // Step 1: the entire text as JSON.
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value) => return Ok(value),
        Err(e) => record_failure(&mut attempts, Strategy::Direct, e.to_string()),
    }

    // Step 2: fenced code block.
    match fenced_block(text) {
        Some(inner) => match serde_json::from_str::<Value>(inner) {
            Ok(value) => return Ok(value),
            Err(e) => record_failure(&mut attempts, Strategy::Fenced, e.to_string()),
        },
        None => record_failure(
            &mut attempts,
            Strategy::Fenced,
            "no fenced block found".to_string(),
        ),
    }

    // Step 3: first balanced array.
    match balanced_slice(text, '[', ']') {
        Some(slice) => match serde_json::from_str::<Value>(slice) {
            Ok(value) => return Ok(value),
            Err(e) => record_failure(&mut attempts, Strategy::Array, e.to_string()),
        },
        None => record_failure(
            &mut attempts,
            Strategy::Array,
            "no balanced array found".to_string(),
        ),
    }

    // Step 4: first balanced object.
    match balanced_slice(text, '{', '}') {
        Some(slice) => match serde_json::from_str::<Value>(slice) {
            Ok(value) => return Ok(value),
            Err(e) => record_failure(&mut attempts, Strategy::Object, e.to_string()),
        },
        None => record_failure(
            &mut attempts,
            Strategy::Object,
            "no balanced object found".to_string(),
        ),
    }

    Err(ParseError { attempts })
}

/// Full cascade including step 5: if no structural strategy succeeds, issue
/// one secondary LLM call whose sole task is reformatting the text into JSON
/// matching `schema_hint`, then retry the direct parse on that response.
pub async fn extract_json_or_reformat(
    backend: &dyn ChatBackend,
    model: &str,
    text: &str,
    schema_hint: &str,
) -> Result<Value, ParseError> {
    let mut error = match extract_json(text) {
        Ok(value) => return Ok(value),
        Err(e) => e,
    };

    debug!("structural extraction exhausted, escalating to reformat call");

    let prompt = prompts::REFORMAT_PROMPT_TEMPLATE
        .replace("{content}", text)
        .replace("{schema}", schema_hint);
    let messages = [
        ChatMessage::system(prompts::REFORMAT_SYSTEM),
        ChatMessage::user(prompt),
    ];

    match backend.send(&messages, model, REFORMAT_TEMPERATURE).await {
        Ok(response) => match serde_json::from_str::<Value>(response.content.trim()) {
            Ok(value) => Ok(value),
            Err(e) => {
                record_failure(&mut error.attempts, Strategy::Reformat, e.to_string());
                Err(error)
            }
        },
        Err(e) => {
            record_failure(&mut error.attempts, Strategy::Reformat, e.to_string());
            Err(error)
        }
    }
}

fn record_failure(attempts: &mut Vec<Attempt>, strategy: Strategy, reason: String) {
    debug!("extraction strategy {} failed: {}", strategy.name(), reason);
    attempts.push(Attempt { strategy, reason });
}

/// Returns the contents of the first ``` / ```json fenced block, if any.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_fence = &text[open + 3..];
    // Skip an optional language tag up to the end of the opening line.
    let body_start = after_fence.find('\n').map(|i| i + 1).unwrap_or(0);
    let body = &after_fence[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

/// Returns the first balanced `open ... close` slice, tracking nesting depth
/// and skipping delimiters inside JSON string literals.
fn balanced_slice(text: &str, open: char, close: char) -> Option<&str> {
    let start = text.find(open)?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == open {
            depth += 1;
        } else if c == close {
            depth -= 1;
            if depth == 0 {
                return Some(&text[start..start + i + c.len_utf8()]);
            }
        }
    }
    None
}

// ────────────────────────────────────────────────────────────────────────────
// Post-parse normalization — applied uniformly regardless of which cascade
// step succeeded.
// ────────────────────────────────────────────────────────────────────────────

/// Coerces a parsed value into a list of records: an array yields its items,
/// a single object becomes a one-element list, anything else is empty.
pub fn ensure_array(value: Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items,
        Value::Object(_) => vec![value],
        _ => Vec::new(),
    }
}

/// Coerces a field expected to be a list of strings: a scalar string becomes
/// a one-element list; anything that is neither list nor string is empty.
pub fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(String::from))
            .collect(),
        Value::String(s) => vec![s.clone()],
        _ => Vec::new(),
    }
}
