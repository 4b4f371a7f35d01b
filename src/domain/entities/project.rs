use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::entities::patch::Patch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "project_category", rename_all = "kebab-case")]
pub enum ProjectCategory {
    Web,
    Mobile,
    DataScience,
    MachineLearning,
    Other,
}

impl Default for ProjectCategory {
    fn default() -> Self {
        ProjectCategory::Web
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "kebab-case")]
#[sqlx(type_name = "project_status", rename_all = "kebab-case")]
pub enum ProjectStatus {
    Completed,
    InProgress,
    Planned,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Completed
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub technologies: Vec<String>,
    pub image: String,
    pub link: String,
    pub github_link: String,
    pub featured: bool,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub demo_video: String,
    pub tags: Vec<String>,
    pub client: String,
    pub role: String,
    pub team_size: Option<i32>,
    pub challenges: String,
    pub solution: String,
    pub results: String,
    pub screenshots: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query constraints for `GET /api/projects`. Absent keys impose no
/// constraint; `search` switches the ordering to relevance rank.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ProjectFilter {
    pub featured: Option<bool>,
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
    pub search: Option<String>,
}

impl ProjectFilter {
    /// Non-empty search term, if one was supplied.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewProjectRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    #[serde(default)]
    pub short_description: String,

    #[serde(default)]
    pub technologies: Vec<String>,

    #[serde(default)]
    #[validate(custom(function = "validate_image_url"))]
    pub image: String,

    #[serde(default)]
    #[validate(custom(function = "validate_link_url"))]
    pub link: String,

    #[serde(default)]
    pub github_link: String,

    #[serde(default)]
    pub featured: bool,

    #[serde(default)]
    pub category: ProjectCategory,

    #[serde(default)]
    pub status: ProjectStatus,

    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub demo_video: String,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub client: String,

    #[serde(default)]
    pub role: String,

    #[serde(default)]
    pub team_size: Option<i32>,

    #[serde(default)]
    pub challenges: String,

    #[serde(default)]
    pub solution: String,

    #[serde(default)]
    pub results: String,

    #[serde(default)]
    pub screenshots: Vec<String>,
}

/// Row values for the INSERT; timestamps are assigned by the service,
/// not by a hidden lifecycle hook.
#[derive(Debug, Clone)]
pub struct ProjectInsert {
    pub title: String,
    pub description: String,
    pub short_description: String,
    pub technologies: Vec<String>,
    pub image: String,
    pub link: String,
    pub github_link: String,
    pub featured: bool,
    pub category: ProjectCategory,
    pub status: ProjectStatus,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub demo_video: String,
    pub tags: Vec<String>,
    pub client: String,
    pub role: String,
    pub team_size: Option<i32>,
    pub challenges: String,
    pub solution: String,
    pub results: String,
    pub screenshots: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectInsert {
    pub fn from_request(req: NewProjectRequest, now: DateTime<Utc>) -> Self {
        ProjectInsert {
            title: req.title,
            description: req.description,
            short_description: req.short_description,
            technologies: req.technologies,
            image: req.image,
            link: req.link,
            github_link: req.github_link,
            featured: req.featured,
            category: req.category,
            status: req.status,
            start_date: req.start_date,
            end_date: req.end_date,
            demo_video: req.demo_video,
            tags: req.tags,
            client: req.client,
            role: req.role,
            team_size: req.team_size,
            challenges: req.challenges,
            solution: req.solution,
            results: req.results,
            screenshots: req.screenshots,
            created_at: now,
            updated_at: now,
        }
    }
}

/// PUT merge body. Plain fields use `Option` (absent → unchanged);
/// nullable columns use `Patch` so an explicit `null` clears them.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateProjectRequest {
    #[validate(custom(function = "validate_optional_title"))]
    pub title: Option<String>,

    #[validate(custom(function = "validate_optional_description"))]
    pub description: Option<String>,

    pub short_description: Option<String>,
    pub technologies: Option<Vec<String>>,

    #[validate(custom(function = "validate_image_url"))]
    pub image: Option<String>,

    #[validate(custom(function = "validate_link_url"))]
    pub link: Option<String>,

    pub github_link: Option<String>,
    pub featured: Option<bool>,
    pub category: Option<ProjectCategory>,
    pub status: Option<ProjectStatus>,
    pub start_date: Patch<DateTime<Utc>>,
    pub end_date: Patch<DateTime<Utc>>,
    pub demo_video: Option<String>,
    pub tags: Option<Vec<String>>,
    pub client: Option<String>,
    pub role: Option<String>,
    pub team_size: Patch<i32>,
    pub challenges: Option<String>,
    pub solution: Option<String>,
    pub results: Option<String>,
    pub screenshots: Option<Vec<String>>,
}

// ───── Validation helpers ───────────────────────────────────────────

fn validate_image_url(url: &str) -> Result<(), ValidationError> {
    validate_required_url(url, "Image URL is required")
}

fn validate_link_url(url: &str) -> Result<(), ValidationError> {
    validate_required_url(url, "Project link is required")
}

fn validate_optional_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(new_validation_error("required", "Title is required"));
    }
    Ok(())
}

fn validate_optional_description(description: &str) -> Result<(), ValidationError> {
    if description.trim().is_empty() {
        return Err(new_validation_error("required", "Description is required"));
    }
    Ok(())
}

fn validate_required_url(url: &str, required_msg: &'static str) -> Result<(), ValidationError> {
    if url.trim().is_empty() {
        return Err(new_validation_error("required", required_msg));
    }
    match url::Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "http" || parsed.scheme() == "https" => Ok(()),
        Ok(_) => Err(new_validation_error(
            "invalid_url_scheme",
            "URL must start with http:// or https://",
        )),
        Err(_) => Err(new_validation_error("invalid_url", "Invalid URL format")),
    }
}

pub(crate) fn new_validation_error(code: &'static str, msg: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(msg));
    err
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> NewProjectRequest {
        serde_json::from_value(serde_json::json!({
            "title": "Crate Tracker",
            "description": "Tracks crates",
            "image": "https://example.com/shot.png",
            "link": "https://example.com"
        }))
        .unwrap()
    }

    #[test]
    fn defaults_are_applied_on_create() {
        let req = valid_request();
        assert_eq!(req.short_description, "");
        assert_eq!(req.category, ProjectCategory::Web);
        assert_eq!(req.status, ProjectStatus::Completed);
        assert!(!req.featured);
        assert!(req.technologies.is_empty());
        assert!(req.start_date.is_none());
        assert!(req.team_size.is_none());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn missing_required_fields_are_reported() {
        let req: NewProjectRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        let by_field = errors.field_errors();
        let fields: Vec<&str> = by_field.keys().map(|k| k.as_ref()).collect();
        for field in ["title", "description", "image", "link"] {
            assert!(fields.contains(&field), "missing error for {field}");
        }
    }

    #[test]
    fn non_http_link_is_rejected() {
        let mut req = valid_request();
        req.link = "ftp://example.com".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn update_body_distinguishes_null_from_absent() {
        let patch: UpdateProjectRequest =
            serde_json::from_str(r#"{"endDate": null, "teamSize": 4}"#).unwrap();
        assert!(patch.start_date.is_absent());
        assert!(patch.end_date.is_null());
        assert_eq!(patch.team_size.value(), Some(&4));
        assert!(patch.title.is_none());
    }

    #[test]
    fn filter_deserializes_from_query_params() {
        let filter: ProjectFilter = serde_json::from_value(serde_json::json!({
            "featured": true,
            "category": "data-science"
        }))
        .unwrap();
        assert_eq!(filter.featured, Some(true));
        assert_eq!(filter.category, Some(ProjectCategory::DataScience));
        assert_eq!(filter.status, None);
        assert_eq!(filter.search_term(), None);
    }
}
