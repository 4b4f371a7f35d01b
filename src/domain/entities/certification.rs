use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::entities::patch::Patch;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub id: Uuid,
    pub title: String,
    pub issuing_organization: String,
    pub issue_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// `skills` arrives either as a JSON array or as one comma-separated
/// string ("aws, terraform") which is split and trimmed.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum SkillsInput {
    List(Vec<String>),
    Csv(String),
}

impl SkillsInput {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            SkillsInput::List(list) => list,
            SkillsInput::Csv(csv) => csv
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCertificationRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Issuing organization is required"))]
    pub issuing_organization: String,

    #[validate(required(message = "Issue date is required"))]
    #[serde(default)]
    pub issue_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub expiration_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub credential_id: Option<String>,

    #[serde(default)]
    pub credential_url: Option<String>,

    #[serde(default)]
    pub skills: Option<SkillsInput>,
}

#[derive(Debug, Clone)]
pub struct CertificationInsert {
    pub title: String,
    pub issuing_organization: String,
    pub issue_date: DateTime<Utc>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// PUT merge body. `expirationDate` and `credentialId` are clearable
/// via explicit null; `credentialUrl` is only replaced when a value is
/// given.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateCertificationRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_optional_organization"))]
    pub issuing_organization: Option<String>,

    pub issue_date: Option<DateTime<Utc>>,
    pub expiration_date: Patch<DateTime<Utc>>,
    pub credential_id: Patch<String>,
    pub credential_url: Option<String>,
    pub skills: Option<SkillsInput>,
}

/// Store-facing patch with the comma-separated skills form already
/// normalized away.
#[derive(Debug, Clone, Default)]
pub struct CertificationPatch {
    pub title: Option<String>,
    pub issuing_organization: Option<String>,
    pub issue_date: Option<DateTime<Utc>>,
    pub expiration_date: Patch<DateTime<Utc>>,
    pub credential_id: Patch<String>,
    pub credential_url: Option<String>,
    pub skills: Option<Vec<String>>,
}

impl From<UpdateCertificationRequest> for CertificationPatch {
    fn from(req: UpdateCertificationRequest) -> Self {
        CertificationPatch {
            title: req.title,
            issuing_organization: req.issuing_organization,
            issue_date: req.issue_date,
            expiration_date: req.expiration_date,
            credential_id: req.credential_id,
            credential_url: req.credential_url,
            skills: req.skills.map(SkillsInput::into_vec),
        }
    }
}

fn validate_optional_title(title: &str) -> Result<(), validator::ValidationError> {
    if title.trim().is_empty() {
        return Err(super::project::new_validation_error(
            "required",
            "Title is required",
        ));
    }
    Ok(())
}

fn validate_optional_organization(org: &str) -> Result<(), validator::ValidationError> {
    if org.trim().is_empty() {
        return Err(super::project::new_validation_error(
            "required",
            "Issuing organization is required",
        ));
    }
    Ok(())
}
