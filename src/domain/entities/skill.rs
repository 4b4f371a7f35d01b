use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A skill group: one category holding an ordered list of skill names.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub id: Uuid,
    pub category: String,
    pub skills: Vec<String>,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewSkillRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skills: Vec<String>,

    #[serde(default)]
    pub icon: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SkillInsert {
    pub category: String,
    pub skills: Vec<String>,
    pub icon: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SkillInsert {
    pub fn from_request(req: NewSkillRequest, now: DateTime<Utc>) -> Self {
        SkillInsert {
            category: req.category,
            skills: req.skills,
            icon: req.icon.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateSkillRequest {
    #[validate(custom(function = "validate_optional_category"))]
    pub category: Option<String>,

    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skills: Option<Vec<String>>,

    pub icon: Option<String>,
}

fn validate_optional_category(category: &str) -> Result<(), validator::ValidationError> {
    if category.trim().is_empty() {
        return Err(super::project::new_validation_error(
            "required",
            "Category is required",
        ));
    }
    Ok(())
}
