//! Résumé audit.
//!
//! `quick_audit` is free and local: structure checks on the parsed sections
//! plus impact heuristics on experience and project bullets.
//! `deep_audit` asks the LLM for a recruiter-style review and is premium only;
//! the entitlement check happens in the handler.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::cleanup::clean_for_display;
use crate::document::outline::tokenize_skills;
use crate::document::sections::{analyze, CanonicalSection, ParsedDocument, SectionKey, SectionMap};
use crate::errors::AppError;
use crate::generation::prompts::{AUDIT_PERSONA, AUDIT_PROMPT_TEMPLATE};
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;

const VAGUE_VERBS: &[&str] = &[
    "improved",
    "enhanced",
    "helped",
    "worked on",
    "assisted",
    "supported",
    "participated",
    "involved",
    "responsible for",
];

/// Sections every résumé is expected to have. Summary also accepts Objective.
const CORE_SECTIONS: [CanonicalSection; 4] = [
    CanonicalSection::Summary,
    CanonicalSection::Experience,
    CanonicalSection::Education,
    CanonicalSection::Skills,
];

const MIN_SKILLS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuditFinding {
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuickAudit {
    pub score: u8,
    pub structured: bool,
    pub sections_found: Vec<String>,
    pub missing_sections: Vec<String>,
    pub bullet_count: usize,
    pub quantified_bullets: usize,
    pub findings: Vec<AuditFinding>,
}

/// LLM review, deserialized from the model's JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeepAudit {
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
}

/// True when the bullet states impact with a number, percentage, currency or
/// an explicit `[LOW_METRICS]` marker.
pub fn is_quantified(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || text.contains("[LOW_METRICS]")
        || text.contains('%')
        || text.contains('$')
        || text.contains('€')
        || text.contains('£')
}

/// First vague verb found in `text`, if any.
pub fn vague_verb(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    VAGUE_VERBS.iter().copied().find(|v| lower.contains(v))
}

fn has_section(map: &SectionMap, section: CanonicalSection) -> bool {
    map.keys().any(|key| match key {
        SectionKey::Canonical(c) => {
            *c == section || (section == CanonicalSection::Summary && *c == CanonicalSection::Objective)
        }
        SectionKey::Other(label) => label.contains(section.token()),
        SectionKey::Header => false,
    })
}

fn section_body(map: &SectionMap, section: CanonicalSection) -> Option<&str> {
    map.canonical(section).or_else(|| {
        map.iter().find_map(|(key, body)| match key {
            SectionKey::Other(label) if label.contains(section.token()) => Some(body),
            _ => None,
        })
    })
}

/// Local, deterministic résumé check. Never fails.
pub fn quick_audit(text: &str) -> QuickAudit {
    let mut findings = Vec::new();
    let mut score: i32 = 100;

    let map = match analyze(text) {
        ParsedDocument::Structured(map) => map,
        ParsedDocument::Raw(_) => {
            findings.push(AuditFinding {
                severity: Severity::Critical,
                section: None,
                message: "No section headings detected. Use headings such as SUMMARY, EXPERIENCE, \
                          EDUCATION and SKILLS so templates can lay the résumé out."
                    .to_string(),
            });
            return QuickAudit {
                score: 40,
                structured: false,
                sections_found: vec![],
                missing_sections: CORE_SECTIONS.iter().map(|s| s.title().to_string()).collect(),
                bullet_count: 0,
                quantified_bullets: 0,
                findings,
            };
        }
    };

    let sections_found: Vec<String> = map
        .keys()
        .filter(|k| **k != SectionKey::Header)
        .map(|k| k.title())
        .collect();

    let mut missing_sections = Vec::new();
    for section in CORE_SECTIONS {
        if !has_section(&map, section) {
            score -= 10;
            missing_sections.push(section.title().to_string());
            findings.push(AuditFinding {
                severity: Severity::Warning,
                section: Some(section.title().to_string()),
                message: format!("Missing a {} section.", section.title()),
            });
        }
    }

    if let Some(skills) = section_body(&map, CanonicalSection::Skills) {
        let count = tokenize_skills(skills).len();
        if count < MIN_SKILLS {
            score -= 5;
            findings.push(AuditFinding {
                severity: Severity::Info,
                section: Some("Skills".to_string()),
                message: format!("Only {count} skill(s) listed; name at least {MIN_SKILLS}."),
            });
        }
    }

    let bullets: Vec<String> = [CanonicalSection::Experience, CanonicalSection::Projects]
        .into_iter()
        .filter_map(|s| section_body(&map, s))
        .flat_map(clean_for_display)
        .filter(|line| line.bullet)
        .map(|line| line.text)
        .collect();
    let quantified = bullets.iter().filter(|b| is_quantified(b)).count();

    if !bullets.is_empty() {
        let unquantified = bullets.len() - quantified;
        score -= (30 * unquantified / bullets.len()) as i32;
        if unquantified > 0 {
            findings.push(AuditFinding {
                severity: Severity::Warning,
                section: Some("Experience".to_string()),
                message: format!(
                    "{unquantified} of {} bullets state no measurable impact. Add a number, \
                     percentage or time saved.",
                    bullets.len()
                ),
            });
        }
    } else if has_section(&map, CanonicalSection::Experience) {
        score -= 5;
        findings.push(AuditFinding {
            severity: Severity::Info,
            section: Some("Experience".to_string()),
            message: "Experience has no bullet points; short bullets scan faster.".to_string(),
        });
    }

    let mut vague_penalty = 0;
    for bullet in bullets.iter().filter(|b| !is_quantified(b)) {
        if let Some(verb) = vague_verb(bullet) {
            vague_penalty += 2;
            findings.push(AuditFinding {
                severity: Severity::Info,
                section: Some("Experience".to_string()),
                message: format!(
                    "'{}' uses the vague verb '{verb}'. Lead with what you built or changed.",
                    bullet.chars().take(60).collect::<String>()
                ),
            });
        }
    }
    score -= vague_penalty.min(10);

    let score = score.clamp(0, 100) as u8;
    debug!(score, bullets = bullets.len(), quantified, "Quick audit complete");

    QuickAudit {
        score,
        structured: true,
        sections_found,
        missing_sections,
        bullet_count: bullets.len(),
        quantified_bullets: quantified,
        findings,
    }
}

/// Recruiter-style review through the LLM. Premium only; callers check the
/// entitlement snapshot first.
pub async fn deep_audit(
    text: &str,
    target_role: &str,
    llm: &LlmClient,
) -> Result<DeepAudit, AppError> {
    if text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }
    let role = match target_role.trim() {
        "" => "the candidate's target role",
        role => role,
    };
    let prompt = AUDIT_PROMPT_TEMPLATE
        .replace("{target_role}", role)
        .replace("{resume}", text.trim());

    let mut audit: DeepAudit = llm
        .call_json(&prompt, &format!("{AUDIT_PERSONA} {JSON_ONLY_SYSTEM}"))
        .await?;
    audit.score = audit.score.min(100);
    Ok(audit)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG: &str = "SUMMARY\nBackend engineer.\nEXPERIENCE\n- Cut p99 latency by 40%\n- Shipped billing v2 to 3M users\nEDUCATION\nBSc CS\nSKILLS\nRust, Go, SQL";

    #[test]
    fn test_strong_resume_scores_full_marks() {
        let audit = quick_audit(STRONG);
        assert!(audit.structured);
        assert_eq!(audit.score, 100, "{:?}", audit.findings);
        assert!(audit.missing_sections.is_empty());
        assert_eq!(audit.bullet_count, 2);
        assert_eq!(audit.quantified_bullets, 2);
    }

    #[test]
    fn test_unstructured_text_is_critical() {
        let audit = quick_audit("I am an engineer who likes Rust.");
        assert!(!audit.structured);
        assert_eq!(audit.findings[0].severity, Severity::Critical);
        assert_eq!(audit.missing_sections.len(), 4);
    }

    #[test]
    fn test_missing_sections_and_vague_bullets_lower_score() {
        let text = "OBJECTIVE\nGet hired.\nEXPERIENCE\n- Helped the team with deployments\n- Worked on various features";
        let audit = quick_audit(text);
        assert_eq!(audit.missing_sections, vec!["Education", "Skills"]);
        assert_eq!(audit.quantified_bullets, 0);
        // 2 missing sections, all bullets unquantified, two vague verbs.
        assert_eq!(audit.score, 100 - 20 - 30 - 4);
    }

    #[test]
    fn test_few_skills_flagged() {
        let text = "SUMMARY\nX\nEXPERIENCE\n- Built 2 services\nEDUCATION\nBSc\nSKILLS\nRust";
        let audit = quick_audit(text);
        assert_eq!(audit.score, 95);
    }

    #[test]
    fn test_quantification_heuristics() {
        assert!(is_quantified("Reduced costs by $2k"));
        assert!(is_quantified("Improved uptime [LOW_METRICS]"));
        assert!(!is_quantified("Improved uptime significantly"));
        assert_eq!(vague_verb("Was Responsible For hiring"), Some("responsible for"));
        assert_eq!(vague_verb("Designed the API"), None);
    }

    #[test]
    fn test_deep_audit_parses_model_json() {
        let json = r#"{"score": 81, "strengths": ["a"], "improvements": ["b", "c"]}"#;
        let audit: DeepAudit = serde_json::from_str(json).unwrap();
        assert_eq!(audit.score, 81);
        assert_eq!(audit.improvements.len(), 2);
    }
}
