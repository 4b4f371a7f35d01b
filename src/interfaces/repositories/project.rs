use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::{
        patch::Patch,
        project::{Project, ProjectFilter, ProjectInsert, UpdateProjectRequest},
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxProjectRepo,
};

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn check_connection(&self) -> Result<(), AppError>;

    /// Equality filters ANDed together; a search term adds a full-text
    /// predicate and switches ordering to relevance rank.
    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError>;

    /// Full-text matches ranked purely by relevance score.
    async fn search_projects(&self, keyword: &str) -> Result<Vec<Project>, AppError>;

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError>;
    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError>;
    async fn update_project(
        &self,
        id: &Uuid,
        patch: &UpdateProjectRequest,
    ) -> Result<Project, AppError>;
    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxProjectRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxProjectRepo { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqlxProjectRepo {
    async fn check_connection(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(AppError::from)
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT * FROM projects WHERE TRUE");

        if let Some(featured) = filter.featured {
            builder.push(" AND featured = ").push_bind(featured);
        }
        if let Some(category) = filter.category {
            builder.push(" AND category = ").push_bind(category);
        }
        if let Some(status) = filter.status {
            builder.push(" AND status = ").push_bind(status);
        }

        if let Some(term) = filter.search_term() {
            builder
                .push(" AND search_tsv @@ plainto_tsquery('english', ")
                .push_bind(term)
                .push(")");
            builder
                .push(" ORDER BY ts_rank(search_tsv, plainto_tsquery('english', ")
                .push_bind(term)
                .push(")) DESC");
        } else {
            builder.push(" ORDER BY featured DESC, created_at DESC");
        }

        let projects = builder
            .build_query_as::<Project>()
            .fetch_all(&self.pool)
            .await?;

        Ok(projects)
    }

    async fn search_projects(&self, keyword: &str) -> Result<Vec<Project>, AppError> {
        let projects = sqlx::query_as::<_, Project>(
            r#"
            SELECT * FROM projects
            WHERE search_tsv @@ plainto_tsquery('english', $1)
            ORDER BY ts_rank(search_tsv, plainto_tsquery('english', $1)) DESC
            "#,
        )
        .bind(keyword)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(project)
    }

    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (
                title, description, short_description, technologies, image, link,
                github_link, featured, category, status, start_date, end_date,
                demo_video, tags, client, role, team_size, challenges, solution,
                results, screenshots, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12,
                $13, $14, $15, $16, $17, $18, $19, $20, $21, $22, $23
            )
            RETURNING *
            "#,
        )
        .bind(&insert.title)
        .bind(&insert.description)
        .bind(&insert.short_description)
        .bind(&insert.technologies)
        .bind(&insert.image)
        .bind(&insert.link)
        .bind(&insert.github_link)
        .bind(insert.featured)
        .bind(insert.category)
        .bind(insert.status)
        .bind(insert.start_date)
        .bind(insert.end_date)
        .bind(&insert.demo_video)
        .bind(&insert.tags)
        .bind(&insert.client)
        .bind(&insert.role)
        .bind(insert.team_size)
        .bind(&insert.challenges)
        .bind(&insert.solution)
        .bind(&insert.results)
        .bind(&insert.screenshots)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(project)
    }

    async fn update_project(
        &self,
        id: &Uuid,
        patch: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        // updated_at is refreshed unconditionally; every other SET
        // clause is appended only when the caller supplied the key.
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE projects SET updated_at = NOW()");

        if let Some(title) = &patch.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(description) = &patch.description {
            builder.push(", description = ").push_bind(description);
        }
        if let Some(short_description) = &patch.short_description {
            builder
                .push(", short_description = ")
                .push_bind(short_description);
        }
        if let Some(technologies) = &patch.technologies {
            builder.push(", technologies = ").push_bind(technologies);
        }
        if let Some(image) = &patch.image {
            builder.push(", image = ").push_bind(image);
        }
        if let Some(link) = &patch.link {
            builder.push(", link = ").push_bind(link);
        }
        if let Some(github_link) = &patch.github_link {
            builder.push(", github_link = ").push_bind(github_link);
        }
        if let Some(featured) = patch.featured {
            builder.push(", featured = ").push_bind(featured);
        }
        if let Some(category) = patch.category {
            builder.push(", category = ").push_bind(category);
        }
        if let Some(status) = patch.status {
            builder.push(", status = ").push_bind(status);
        }
        push_nullable(&mut builder, "start_date", &patch.start_date);
        push_nullable(&mut builder, "end_date", &patch.end_date);
        if let Some(demo_video) = &patch.demo_video {
            builder.push(", demo_video = ").push_bind(demo_video);
        }
        if let Some(tags) = &patch.tags {
            builder.push(", tags = ").push_bind(tags);
        }
        if let Some(client) = &patch.client {
            builder.push(", client = ").push_bind(client);
        }
        if let Some(role) = &patch.role {
            builder.push(", role = ").push_bind(role);
        }
        push_nullable(&mut builder, "team_size", &patch.team_size);
        if let Some(challenges) = &patch.challenges {
            builder.push(", challenges = ").push_bind(challenges);
        }
        if let Some(solution) = &patch.solution {
            builder.push(", solution = ").push_bind(solution);
        }
        if let Some(results) = &patch.results {
            builder.push(", results = ").push_bind(results);
        }
        if let Some(screenshots) = &patch.screenshots {
            builder.push(", screenshots = ").push_bind(screenshots);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let updated = builder
            .build_query_as::<Project>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Project not found".into()))?;

        Ok(updated)
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }

        Ok(())
    }
}

/// Append a SET clause for a tri-state column: skipped when absent,
/// `col = NULL` when cleared, bound when given a value.
fn push_nullable<'args, T>(
    builder: &mut QueryBuilder<'args, Postgres>,
    column: &str,
    patch: &'args Patch<T>,
) where
    T: sqlx::Type<Postgres> + for<'q> sqlx::Encode<'q, Postgres> + Sync,
{
    match patch {
        Patch::Absent => {}
        Patch::Null => {
            builder.push(format!(", {} = NULL", column));
        }
        Patch::Value(v) => {
            builder.push(format!(", {} = ", column)).push_bind(v);
        }
    }
}

#[async_trait]
impl<T> ProjectRepository for Arc<T>
where
    T: ProjectRepository + ?Sized,
{
    async fn check_connection(&self) -> Result<(), AppError> {
        (**self).check_connection().await
    }

    async fn list_projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, AppError> {
        (**self).list_projects(filter).await
    }

    async fn search_projects(&self, keyword: &str) -> Result<Vec<Project>, AppError> {
        (**self).search_projects(keyword).await
    }

    async fn get_project_by_id(&self, id: &Uuid) -> Result<Project, AppError> {
        (**self).get_project_by_id(id).await
    }

    async fn create_project(&self, insert: &ProjectInsert) -> Result<Project, AppError> {
        (**self).create_project(insert).await
    }

    async fn update_project(
        &self,
        id: &Uuid,
        patch: &UpdateProjectRequest,
    ) -> Result<Project, AppError> {
        (**self).update_project(id, patch).await
    }

    async fn delete_project(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_project(id).await
    }
}
