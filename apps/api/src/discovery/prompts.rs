// All LLM prompt constants for the Job Discovery module. The primary search
// prompt pair lives in the search configuration store (it is user-editable);
// these are the fixed prompts for fallback search, preference extraction,
// and company lookup.

/// System prompt for the fallback search — solicits best-effort suggestions
/// when the primary search came back empty.
pub const FALLBACK_SYSTEM: &str = "You are a helpful assistant that finds job openings. \
    Your task is to provide at least 2-3 realistic job listings that match the candidate's \
    background, even if they're not perfect matches. \
    Focus on providing REAL companies and REALISTIC job postings with specific details.";

/// Fallback search prompt template. Replace `{background}` and `{criteria}`.
pub const FALLBACK_PROMPT_TEMPLATE: &str = r#"The initial job search returned no results. Please provide at least 2-3 realistic job listings that might be of interest to a candidate with the following background:

{background}

Additional criteria: {criteria}

Return in this JSON format:
[{
  "title": "Job Title",
  "company": "Company Name (must be a specific, real company)",
  "location": "Job Location",
  "description": "Brief job description",
  "requirements": ["Requirement 1", "Requirement 2"],
  "link": "Application URL (use a real job board URL)",
  "posted_date": "Recent date",
  "salary": "Salary range if available"
}]

IMPORTANT:
1. Each job MUST have a specific company name (not N/A or Unknown)
2. Each job MUST have a valid application link
3. Provide realistic, specific details for each job"#;

/// Preference extraction prompt template. Replace `{resume_text}`.
pub const PREFERENCES_PROMPT_TEMPLATE: &str = r#"Extract key job preferences and qualifications from the following resume.
Focus on:
1. Technical skills and expertise
2. Industry experience
3. Role level (entry, mid, senior)
4. Previous company types
5. Educational background

Resume:
{resume_text}

Return the information in a JSON format with these keys:
- skills: list of technical skills
- industries: list of industries worked in
- role_level: string indicating seniority
- preferred_companies: list of company types based on previous experience
- education: object with 'degree' and 'field'"#;

/// System prompt for company lookup.
pub const COMPANY_SYSTEM: &str = "You are a helpful assistant that provides company information. \
    Return results in a clean, structured JSON format.";

/// Company lookup prompt template. Replace `{company}`.
pub const COMPANY_PROMPT_TEMPLATE: &str = r#"Find company information for {company}.

If this appears to be a single company, return a JSON object with these fields:
- name: Company name
- founding_year: Year founded
- size: Company size (employees)
- funding: Funding information
- financial_performance: Financial performance information
- headquarters: Headquarters location

If this appears to be multiple companies or contains multiple company information, return a JSON array of objects, each with the fields above.

Make sure to properly separate and structure the data for each individual company."#;

/// Schema hint for the parser's reformat escalation on company lookups.
pub const COMPANY_SCHEMA_HINT: &str = r#"{
  "name": "Company name",
  "founding_year": "Year founded",
  "size": "Company size (employees)",
  "funding": "Funding information",
  "financial_performance": "Financial performance information",
  "headquarters": "Headquarters location"
}
(or a JSON array of such objects for multiple companies)"#;
