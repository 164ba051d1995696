use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::entities::validation::validate_optional_url;

// ───── Database Model ────────────────────────────────────────────────

/// A portfolio project as persisted and served. `id` and `created_at`
/// are server-assigned and immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: i32,
    pub name: String,
    pub hackathon_name: Option<String>,
    pub hackathon_placement: Option<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub contract_address: Option<String>,
    pub explorer_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

// ───── Input & Validation ───────────────────────────────────────────

/// Client-supplied creation payload. Server-assigned fields are absent
/// by construction; unknown keys in the body are ignored.
#[derive(Debug, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: String,

    pub hackathon_name: Option<String>,

    pub hackathon_placement: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub github_link: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub live_link: Option<String>,

    #[serde(default)]
    pub tech_stack: Vec<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub image_url: Option<String>,

    pub contract_address: Option<String>,

    #[validate(custom(function = "validate_optional_url"))]
    pub explorer_link: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub name: String,
    pub hackathon_name: Option<String>,
    pub hackathon_placement: Option<String>,
    pub github_link: Option<String>,
    pub live_link: Option<String>,
    pub tech_stack: Vec<String>,
    pub image_url: Option<String>,
    pub contract_address: Option<String>,
    pub explorer_link: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<NewProjectRequest> for ProjectInsert {
    type Error = ValidationErrors;

    fn try_from(value: NewProjectRequest) -> Result<Self, Self::Error> {
        value.validate()?;

        Ok(ProjectInsert {
            name: value.name,
            hackathon_name: value.hackathon_name,
            hackathon_placement: value.hackathon_placement,
            github_link: value.github_link,
            live_link: value.live_link,
            tech_stack: value.tech_stack,
            image_url: value.image_url,
            contract_address: value.contract_address,
            explorer_link: value.explorer_link,
            created_at: Utc::now(),
        })
    }
}

impl ProjectInsert {
    /// Materializes the record once the backend has allocated an id.
    pub fn into_project(self, id: i32) -> Project {
        Project {
            id,
            name: self.name,
            hackathon_name: self.hackathon_name,
            hackathon_placement: self.hackathon_placement,
            github_link: self.github_link,
            live_link: self.live_link,
            tech_stack: self.tech_stack,
            image_url: self.image_url,
            contract_address: self.contract_address,
            explorer_link: self.explorer_link,
            created_at: self.created_at,
        }
    }
}
