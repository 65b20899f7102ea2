// All LLM prompt constants for the Interview Prep module. Both prompts pin
// an exact JSON shape because the records are decoded strictly: a missing
// field fails the whole operation.

/// System prompt for the company review call.
pub const REVIEW_SYSTEM: &str = r#"You are a helpful assistant that provides detailed company reviews and ratings.

IMPORTANT: Return ONLY a JSON object with NO additional text or explanation. The JSON must match this EXACT format:
{
  "overall_rating": 4.2,
  "work_life_balance": 4.0,
  "compensation": 4.5,
  "career_growth": 4.3,
  "culture": 4.1,
  "pros": ["Pro 1", "Pro 2"],
  "cons": ["Con 1", "Con 2"],
  "additional_metrics": {"metric_name": 4.0},
  "last_updated": "YYYY-MM-DD"
}

Focus on these key areas:
1. Overall company rating
2. Work-life balance
3. Compensation and benefits
4. Career growth opportunities
5. Company culture
Include the most frequently mentioned pros and cons from employee reviews."#;

/// Company review template. Replace `{company_url}`.
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"Find detailed employee reviews and ratings for the company at this URL: {company_url}

Return the information in this exact JSON format:
{
  "overall_rating": 4.2,
  "work_life_balance": 4.0,
  "compensation": 4.5,
  "career_growth": 4.3,
  "culture": 4.1,
  "pros": ["Pro 1", "Pro 2"],
  "cons": ["Con 1", "Con 2"],
  "additional_metrics": {
    "metric_name": 4.0
  },
  "last_updated": "YYYY-MM-DD"
}"#;

/// System prompt for the interview process call.
pub const INTERVIEW_SYSTEM: &str = r#"You are a helpful assistant that provides detailed interview process information.

IMPORTANT: Return ONLY a JSON object with NO additional text or explanation. The JSON must match this EXACT format:
{
  "role": "Data Scientist/Analyst",
  "difficulty": 4.2,
  "duration": "2-3 weeks",
  "stages": ["Stage 1", "Stage 2"],
  "common_questions": ["Question 1", "Question 2"],
  "tips": ["Tip 1", "Tip 2"],
  "last_updated": "YYYY-MM-DD"
}

Focus on:
1. Detailed interview stages
2. Common technical and behavioral questions
3. Typical duration of the process
4. Tips from successful candidates
5. Overall difficulty rating"#;

/// Interview process template. Replace `{company_url}`.
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"Find the interview process details for roles at this URL: {company_url}

Return the information in this exact JSON format:
{
  "role": "Role Title",
  "difficulty": 4.2,
  "duration": "2-3 weeks",
  "stages": ["Stage 1", "Stage 2"],
  "common_questions": ["Question 1", "Question 2"],
  "tips": ["Tip 1", "Tip 2"],
  "last_updated": "YYYY-MM-DD"
}"#;
