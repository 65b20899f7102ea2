// Prompts for the cascade's escalation step: a secondary LLM call whose sole
// task is reformatting unstructured text into JSON.

/// System prompt for the reformat call.
pub const REFORMAT_SYSTEM: &str = "You are a helpful assistant that parses \
    unstructured text into structured JSON. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON. \
    Do NOT use markdown code fences.";

/// Reformat prompt template. Replace `{content}` and `{schema}` before sending.
pub const REFORMAT_PROMPT_TEMPLATE: &str = r#"Reformat the following text into clean JSON.

Text:
{content}

The JSON must match this schema:
{schema}

Return ONLY the JSON, with no surrounding text."#;
