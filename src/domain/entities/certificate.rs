use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::entities::validation::validate_optional_url;

// ───── Database Model ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: i32,
    pub name: String,
    pub issuing_organization: String,
    /// Free-form display text ("December 2024"), not a structured date.
    pub issue_date: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ───── Input & Validation ───────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificateRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "Issuing organization cannot be empty"))]
    pub issuing_organization: String,

    #[validate(length(min = 1, message = "Issue date cannot be empty"))]
    pub issue_date: String,

    #[validate(custom(function = "validate_optional_url"))]
    pub link: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CertificateInsert {
    pub name: String,
    pub issuing_organization: String,
    pub issue_date: String,
    pub link: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NewCertificateRequest> for CertificateInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewCertificateRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(CertificateInsert {
            name: value.name,
            issuing_organization: value.issuing_organization,
            issue_date: value.issue_date,
            link: value.link,
            image_url: value.image_url,
            created_at: Utc::now(),
        })
    }
}

impl CertificateInsert {
    pub fn into_certificate(self, id: i32) -> Certificate {
        Certificate {
            id,
            name: self.name,
            issuing_organization: self.issuing_organization,
            issue_date: self.issue_date,
            link: self.link,
            image_url: self.image_url,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_request_converts_to_insert() {
        let request: NewCertificateRequest = serde_json::from_value(serde_json::json!({
            "name": "Certified Ethereum Developer",
            "issuingOrganization": "Blockchain Council",
            "issueDate": "December 2024",
            "link": "https://verify.example.org/cert/12345"
        }))
        .unwrap();
        let insert = CertificateInsert::try_from(request).unwrap();
        assert_eq!(insert.issuing_organization, "Blockchain Council");
        assert_eq!(insert.image_url, None);
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let request: NewCertificateRequest = serde_json::from_value(serde_json::json!({
            "name": "Auditor",
            "issuingOrganization": "",
            "issueDate": ""
        }))
        .unwrap();
        let errors = CertificateInsert::try_from(request).unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("issuing_organization"));
        assert!(fields.contains_key("issue_date"));
    }
}
