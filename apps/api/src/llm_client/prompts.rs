// Cross-cutting prompt fragments. Feature-specific prompts live next to the
// feature (see `generation::prompts`).

/// System prompt that enforces JSON-only output.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// System prompt for plain-text career documents.
pub const PLAIN_TEXT_SYSTEM: &str = "You are an expert career writer. \
    Respond with the document text only: no preamble, no closing remarks, \
    no markdown code fences.";

/// Asks for headings the section parser recognizes.
pub const HEADING_INSTRUCTION: &str = "\
    Put each section heading on its own line in uppercase, using these names where they apply: \
    SUMMARY, EDUCATION, SKILLS, EXPERIENCE, PROJECTS, CERTIFICATIONS. \
    List skills comma-separated on one or more lines. Start bullets with '- '.";

/// Guards against invented facts.
pub const GROUNDING_INSTRUCTION: &str = "\
    Use only facts present in the candidate profile. Do NOT invent employers, \
    dates, degrees, metrics or certifications. Omit anything the profile does not support.";
