// All LLM prompt constants for the Resume Optimizer module.

/// System prompt for requirement extraction — enforces JSON-only output.
pub const REQUIREMENTS_SYSTEM: &str = "You are an expert job description analyst. \
    Extract the concrete requirements of a role. \
    You MUST respond with a valid JSON array of strings only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences.";

/// Requirement extraction template. Replace `{job_description}`.
pub const REQUIREMENTS_PROMPT_TEMPLATE: &str = r#"Extract the key requirements from this job description as a JSON array of short strings, most important first.

Job Description:
{job_description}"#;

/// Resume analysis template. Replace `{resume_text}` and `{job_description}`.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the resume and job description provided below and provide detailed feedback:

Resume:
{resume_text}

Job Description:
{job_description}

Please provide analysis in the following format:

1. Skills Match:
- List matching skills between resume and job requirements
- Identify missing or underrepresented skills

2. Experience Alignment:
- How well does the experience align with the role?
- Key achievements that are relevant
- Areas where experience could be better highlighted

3. Specific Recommendations:
- Bullet points of suggested changes or additions
- Keywords to incorporate
- Achievements to emphasize

4. Overall Assessment:
- Brief summary of fit for the role
- Top 3 suggested improvements

Provide specific, actionable feedback that will help improve the resume for this particular role."#;

/// Resume rewrite template. Replace `{resume_text}`, `{job_description}`,
/// and `{analysis}`.
pub const REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below so it is tailored to the job description, applying the analysis provided.

RULES:
- Stay 100% truthful: only use facts already present in the resume
- Tailor language, emphasis, and ordering for this specific role
- Keep a clean, professional plain-text resume format

Job Description:
{job_description}

Analysis to apply:
{analysis}

Resume:
{resume_text}

Return only the rewritten resume."#;

/// Change summary template. Replace `{original}` and `{rewritten}`.
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Compare the original and rewritten resume below and summarize the changes as a short bulleted list (what was added, removed, reworded, or reordered, and why).

Original:
{original}

Rewritten:
{rewritten}"#;

/// Context block appended when regenerating with user feedback.
/// Replace `{previous_output}` and `{feedback}`.
pub const FEEDBACK_CONTEXT_TEMPLATE: &str = r#"

The previous attempt and the user's feedback on it follow. Produce a new version that addresses the feedback.

Previous output:
{previous_output}

User feedback:
{feedback}"#;
