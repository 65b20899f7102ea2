// All LLM prompt constants for the Outreach module.

/// Outreach message template. Replace `{company_name}`, `{contact_name}`,
/// `{role}`, `{background}`, and `{interests}`.
pub const OUTREACH_PROMPT_TEMPLATE: &str = r#"Write a professional and personalized outreach message for a job application with the following details:

Company: {company_name}
Contact: {contact_name}
Role: {role}
Your Background: {background}
Specific Interests: {interests}

The message should:
1. Be concise but engaging
2. Show genuine interest in the company and role
3. Highlight relevant experience
4. Include a clear call to action
5. Maintain a professional yet conversational tone

Write the message in a format suitable for LinkedIn or email:"#;

/// Context block appended when regenerating with user feedback.
/// Replace `{previous_output}` and `{feedback}`.
pub const FEEDBACK_CONTEXT_TEMPLATE: &str = r#"

The previous draft and the user's feedback on it follow. Write a new message that addresses the feedback.

Previous draft:
{previous_output}

User feedback:
{feedback}"#;
