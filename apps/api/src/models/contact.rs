use serde::{Deserialize, Serialize};

/// Candidate details shown in every document header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_link: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    Email,
    Phone,
    Links,
    Project,
}

/// One entry of the contact line (or one badge).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactItem {
    pub kind: ContactKind,
    pub value: String,
}

impl ContactInfo {
    /// Non-empty contact fields in display order.
    pub fn contact_items(&self) -> Vec<ContactItem> {
        let fields = [
            (ContactKind::Email, Some(self.email.as_str())),
            (ContactKind::Phone, Some(self.phone.as_str())),
            (ContactKind::Links, self.links.as_deref()),
            (ContactKind::Project, self.project_link.as_deref()),
        ];
        fields
            .into_iter()
            .filter_map(|(kind, value)| {
                let value = value?.trim();
                (!value.is_empty()).then(|| ContactItem {
                    kind,
                    value: value.to_string(),
                })
            })
            .collect()
    }

    pub fn display_name(&self) -> &str {
        self.full_name.trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_items_skip_empty_fields() {
        let contact = ContactInfo {
            full_name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: "  ".into(),
            links: Some("github.com/jane".into()),
            project_link: None,
        };
        let items = contact.contact_items();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ContactKind::Email);
        assert_eq!(items[1].value, "github.com/jane");
    }

    #[test]
    fn test_missing_fields_deserialize_as_empty() {
        let contact: ContactInfo = serde_json::from_str(r#"{"full_name":"Jane"}"#).unwrap();
        assert_eq!(contact.email, "");
        assert!(contact.links.is_none());
    }
}
