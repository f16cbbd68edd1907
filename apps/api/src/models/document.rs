use std::fmt;

use serde::{Deserialize, Serialize};

/// Exportable document kinds. The serialized name is also the file-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DocumentType {
    #[default]
    #[serde(rename = "resume")]
    Resume,
    #[serde(rename = "coverLetter")]
    CoverLetter,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Resume => "resume",
            DocumentType::CoverLetter => "coverLetter",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the generation collaborator can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationKind {
    Resume,
    CoverLetter,
    Linkedin,
    InterviewPrep,
    Roadmap,
}

impl GenerationKind {
    /// Kinds that can be exported as PDF map onto a document type.
    pub fn document_type(&self) -> Option<DocumentType> {
        match self {
            GenerationKind::Resume => Some(DocumentType::Resume),
            GenerationKind::CoverLetter => Some(DocumentType::CoverLetter),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_wire_names() {
        assert_eq!(serde_json::to_string(&DocumentType::CoverLetter).unwrap(), "\"coverLetter\"");
        let parsed: DocumentType = serde_json::from_str("\"resume\"").unwrap();
        assert_eq!(parsed, DocumentType::Resume);
    }

    #[test]
    fn test_generation_kind_document_type() {
        assert_eq!(GenerationKind::CoverLetter.document_type(), Some(DocumentType::CoverLetter));
        assert_eq!(GenerationKind::Roadmap.document_type(), None);
    }
}
