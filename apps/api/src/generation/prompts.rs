// Prompt templates for the generation and audit features.
// Cross-cutting fragments come from llm_client::prompts.

/// Résumé prompt. Replace `{heading_instruction}`, `{grounding_instruction}`,
/// `{target_role}`, `{job_description}` and `{background}`.
pub const RESUME_PROMPT_TEMPLATE: &str = r#"Write a one-page résumé for the candidate below, targeting the role "{target_role}".

{heading_instruction}
{grounding_instruction}

Order: SUMMARY (2-3 sentences), EDUCATION, SKILLS, EXPERIENCE, PROJECTS, CERTIFICATIONS (omit empty ones).
Experience bullets start with a strong action verb and state measurable impact where the profile gives numbers.
Do not repeat the candidate's name or contact details; they are added separately.

JOB DESCRIPTION (may be empty):
{job_description}

CANDIDATE PROFILE:
{background}"#;

/// Cover-letter prompt. Replace `{grounding_instruction}`, `{target_role}`,
/// `{company}`, `{job_description}` and `{background}`.
pub const COVER_LETTER_PROMPT_TEMPLATE: &str = r#"Write a cover letter for the role "{target_role}" at {company}.

{grounding_instruction}

Three to four short paragraphs separated by blank lines: why this role, two concrete
achievements from the profile, what the candidate brings, a brief close.
Plain prose only: no headings, no bullets, no placeholders like [Company].

JOB DESCRIPTION (may be empty):
{job_description}

CANDIDATE PROFILE:
{background}"#;

/// LinkedIn prompt. Replace `{grounding_instruction}`, `{target_role}` and `{background}`.
pub const LINKEDIN_PROMPT_TEMPLATE: &str = r#"Write LinkedIn profile content for a candidate aiming for "{target_role}".

{grounding_instruction}

Produce three parts, each starting with its label on its own line:
HEADLINE (under 220 characters)
ABOUT (two short paragraphs, first person)
FEATURED SKILLS (comma-separated, at most 10)

CANDIDATE PROFILE:
{background}"#;

/// Interview-prep prompt. Replace `{target_role}`, `{job_description}` and `{background}`.
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"Prepare interview practice material for the role "{target_role}".

Write 8 likely interview questions (mix of technical and behavioural). After each question
give a model answer of 3-5 sentences grounded in the candidate profile, using the STAR
structure for behavioural questions. Format each as:
Q: <question>
A: <answer>

JOB DESCRIPTION (may be empty):
{job_description}

CANDIDATE PROFILE:
{background}"#;

/// Roadmap prompt. Replace `{target_role}` and `{background}`.
pub const ROADMAP_PROMPT_TEMPLATE: &str = r###"Create a 12-week learning roadmap that moves the candidate towards "{target_role}".

Group the plan into phases of 2-4 weeks. For each phase give a heading line
"## Phase N: <theme>", then bullets starting with '- ' for skills to learn,
one concrete project, and a way to measure progress. Build on what the profile
already shows; do not re-teach skills the candidate has.

CANDIDATE PROFILE:
{background}"###;

/// Reviewer persona for the deep audit.
pub const AUDIT_PERSONA: &str = "You are a senior technical recruiter reviewing résumés.";

/// Deep-audit prompt. Replace `{target_role}` and `{resume}`.
pub const AUDIT_PROMPT_TEMPLATE: &str = r#"Review this résumé for the role "{target_role}".

Return a JSON object with this EXACT schema:
{
  "score": 72,
  "strengths": ["Clear quantified impact in the payments migration bullet"],
  "improvements": ["Summary does not mention the target role"]
}

score is an integer 0-100 for how well the résumé would pass a recruiter screen for this role.
Give 3-5 strengths and 3-6 improvements, each one specific sentence that points at the text.

RÉSUMÉ:
{resume}"#;
