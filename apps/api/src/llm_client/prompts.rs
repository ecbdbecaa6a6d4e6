// Summarizer prompt templates.

pub const SYNOPSIS_SYSTEM: &str = "\
You are a recruiting assistant that reads résumés. \
Reply with a single short line listing the candidate's core skills, \
technologies and experience level, separated by commas. \
No preamble, no bullet points, no explanations.";

pub const SYNOPSIS_PROMPT_TEMPLATE: &str = r#"Summarize the skills and professional experience in the résumé below.
The summary will be used as a job search query, so keep it under 40 words
and prefer concrete job titles, technologies and domains.

RÉSUMÉ:
{resume_text}"#;

/// Builds the user message for a synopsis request.
pub fn synopsis_prompt(resume_text: &str) -> String {
    SYNOPSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text)
}
