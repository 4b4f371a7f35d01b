use chrono::Utc;
use validator::Validate;

use crate::{
    entities::project::{
        NewProjectRequest, Project, ProjectFilter, ProjectInsert, UpdateProjectRequest,
    },
    errors::AppError,
    repositories::project::ProjectRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub project_repo: R,
}

impl<R> ProjectHandler<R>
where
    R: ProjectRepository,
{
    pub fn new(project_repo: R) -> Self {
        ProjectHandler { project_repo }
    }

    /// Listing with optional equality filters and full-text search.
    pub async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_projects(filter).await
    }

    /// Relevance-ranked search, independent of the listing filters.
    pub async fn search_projects(&self, keyword: &str) -> Result<Vec<Project>, AppError> {
        self.project_repo.search_projects(keyword.trim()).await
    }

    pub async fn get_project_by_id(&self, project_id: &str) -> Result<Project, AppError> {
        let id = valid_uuid(project_id, "Project not found")?;
        self.project_repo.get_project_by_id(&id).await
    }

    /// Validates the payload, stamps both timestamps, and inserts.
    pub async fn create_project(&self, req: NewProjectRequest) -> Result<Project, AppError> {
        req.validate()?;

        let insert = ProjectInsert::from_request(req, Utc::now());
        self.project_repo.create_project(&insert).await
    }

    /// Merge-updates the record; fields not in the body are untouched,
    /// `updatedAt` is refreshed regardless.
    pub async fn update_project(
        &self,
        project_id: &str,
        patch: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        patch.validate()?;

        let id = valid_uuid(project_id, "Project not found")?;
        self.project_repo.update_project(&id, patch).await
    }

    pub async fn delete_project(&self, project_id: &str) -> Result<(), AppError> {
        let id = valid_uuid(project_id, "Project not found")?;
        self.project_repo.delete_project(&id).await
    }
}
