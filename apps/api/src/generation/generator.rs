//! Document generation: builds a prompt per kind and asks the LLM for plain text.
//!
//! The generation backend is a collaborator: its output is never trusted to be
//! well formed. Résumé text is run through [`analyze`] only to log whether the
//! section parser will find structure; the text itself is returned untouched.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::document::sections::{analyze, SectionMap};
use crate::errors::AppError;
use crate::generation::prompts::{
    COVER_LETTER_PROMPT_TEMPLATE, INTERVIEW_PROMPT_TEMPLATE, LINKEDIN_PROMPT_TEMPLATE,
    RESUME_PROMPT_TEMPLATE, ROADMAP_PROMPT_TEMPLATE,
};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, HEADING_INSTRUCTION, PLAIN_TEXT_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::document::GenerationKind;

/// Longest background the prompt accepts.
pub const MAX_BACKGROUND_CHARS: usize = 12_000;

/// Request body for document generation.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateRequest {
    pub kind: GenerationKind,
    pub target_role: String,
    /// Free-text candidate profile: experience, education, skills.
    pub background: String,
    #[serde(default)]
    pub job_description: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedDocument {
    pub kind: GenerationKind,
    pub text: String,
    /// Parsed sections for résumés; `None` for other kinds or when the text
    /// fell back to raw mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<SectionMap>,
}

impl GenerateRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.target_role.trim().is_empty() {
            return Err(AppError::Validation("target_role cannot be empty".to_string()));
        }
        if self.background.trim().is_empty() {
            return Err(AppError::Validation("background cannot be empty".to_string()));
        }
        if self.background.chars().count() > MAX_BACKGROUND_CHARS {
            return Err(AppError::Validation(format!(
                "background exceeds {MAX_BACKGROUND_CHARS} characters"
            )));
        }
        Ok(())
    }
}

/// Fills the prompt template for `request.kind`.
pub fn build_prompt(request: &GenerateRequest) -> String {
    let template = match request.kind {
        GenerationKind::Resume => RESUME_PROMPT_TEMPLATE,
        GenerationKind::CoverLetter => COVER_LETTER_PROMPT_TEMPLATE,
        GenerationKind::Linkedin => LINKEDIN_PROMPT_TEMPLATE,
        GenerationKind::InterviewPrep => INTERVIEW_PROMPT_TEMPLATE,
        GenerationKind::Roadmap => ROADMAP_PROMPT_TEMPLATE,
    };
    let company = request
        .company
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or("the company");

    template
        .replace("{heading_instruction}", HEADING_INSTRUCTION)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{target_role}", request.target_role.trim())
        .replace("{company}", company)
        .replace(
            "{job_description}",
            request.job_description.as_deref().unwrap_or("").trim(),
        )
        .replace("{background}", request.background.trim())
}

/// Generates one document through the LLM.
pub async fn generate_document(
    request: &GenerateRequest,
    llm: &LlmClient,
) -> Result<GeneratedDocument, AppError> {
    request.validate()?;
    let prompt = build_prompt(request);

    info!(kind = ?request.kind, role = %request.target_role, "Generating document");
    let text = llm.call_text(&prompt, PLAIN_TEXT_SYSTEM).await?;

    let sections = match request.kind {
        GenerationKind::Resume => {
            let parsed = analyze(&text);
            if parsed.is_raw() {
                warn!("Generated résumé has no detectable sections; preview will use raw mode");
                None
            } else {
                Some(parsed.sections().clone())
            }
        }
        _ => None,
    };

    Ok(GeneratedDocument {
        kind: request.kind,
        text,
        sections,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(kind: GenerationKind) -> GenerateRequest {
        GenerateRequest {
            kind,
            target_role: "Backend Engineer".to_string(),
            background: "5 years of Rust at Acme; BSc CS".to_string(),
            job_description: None,
            company: Some("Initech".to_string()),
        }
    }

    #[test]
    fn test_prompt_fills_every_placeholder() {
        for kind in [
            GenerationKind::Resume,
            GenerationKind::CoverLetter,
            GenerationKind::Linkedin,
            GenerationKind::InterviewPrep,
            GenerationKind::Roadmap,
        ] {
            let prompt = build_prompt(&request(kind));
            for placeholder in [
                "{target_role}",
                "{background}",
                "{job_description}",
                "{company}",
                "{grounding_instruction}",
                "{heading_instruction}",
            ] {
                assert!(!prompt.contains(placeholder), "{placeholder} left in {kind:?}");
            }
            assert!(prompt.contains("Backend Engineer"));
            assert!(prompt.contains("5 years of Rust"));
        }
    }

    #[test]
    fn test_cover_letter_prompt_names_company() {
        assert!(build_prompt(&request(GenerationKind::CoverLetter)).contains("at Initech"));
        let mut anonymous = request(GenerationKind::CoverLetter);
        anonymous.company = Some("  ".to_string());
        assert!(build_prompt(&anonymous).contains("at the company"));
    }

    #[test]
    fn test_resume_prompt_asks_for_parser_headings() {
        assert!(build_prompt(&request(GenerationKind::Resume)).contains("SUMMARY, EDUCATION, SKILLS"));
    }

    #[test]
    fn test_validation_rejects_blank_inputs() {
        let mut r = request(GenerationKind::Resume);
        r.target_role = " ".to_string();
        assert!(matches!(r.validate(), Err(AppError::Validation(_))));

        let mut r = request(GenerationKind::Resume);
        r.background = "x".repeat(MAX_BACKGROUND_CHARS + 1);
        assert!(matches!(r.validate(), Err(AppError::Validation(_))));

        assert!(request(GenerationKind::Roadmap).validate().is_ok());
    }

    #[test]
    fn test_generate_request_deserialization() {
        let json = serde_json::json!({
            "kind": "interview_prep",
            "target_role": "SRE",
            "background": "On-call lead"
        });
        let r: GenerateRequest = serde_json::from_value(json).unwrap();
        assert_eq!(r.kind, GenerationKind::InterviewPrep);
        assert!(r.job_description.is_none());
    }
}
