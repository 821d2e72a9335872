use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::resources::repo_types::Resource;
use crate::validation::{Validate, ValidationErrors};

#[derive(Debug, Deserialize)]
pub struct CreateResource {
    pub title: String,
    pub resource_type: String,
    pub url: String,
}

impl Validate for CreateResource {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.title.trim().is_empty() {
            errors.add("title", "cannot be empty");
        }
        if self.url.trim().is_empty() {
            errors.add("url", "cannot be empty");
        }
        errors.into_result()
    }
}

#[derive(Debug, Serialize)]
pub struct ResourceResponse {
    pub id: i64,
    pub title: String,
    pub resource_type: String,
    pub url: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<Resource> for ResourceResponse {
    fn from(r: Resource) -> Self {
        Self {
            id: r.id,
            title: r.title,
            resource_type: r.resource_type,
            url: r.url,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_title_and_url_are_rejected() {
        let input = CreateResource {
            title: "  ".into(),
            resource_type: "video".into(),
            url: String::new(),
        };
        let errors = input.validate().unwrap_err();
        let fields: Vec<_> = errors.fields().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, ["title", "url"]);
    }

    #[test]
    fn resource_type_may_be_empty() {
        let input = CreateResource {
            title: "Khan Academy".into(),
            resource_type: String::new(),
            url: "https://www.khanacademy.org".into(),
        };
        assert!(input.validate().is_ok());
    }
}
