use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::skill::{Skill, SkillInsert, UpdateSkillRequest},
    errors::AppError,
    repositories::sqlx_repo::SqlxSkillRepo,
};

#[async_trait]
pub trait SkillRepository: Send + Sync {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError>;
    async fn get_skill_by_id(&self, id: &Uuid) -> Result<Skill, AppError>;
    async fn create_skill(&self, insert: &SkillInsert) -> Result<Skill, AppError>;
    async fn update_skill(&self, id: &Uuid, patch: &UpdateSkillRequest)
    -> Result<Skill, AppError>;
    async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxSkillRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxSkillRepo { pool }
    }
}

#[async_trait]
impl SkillRepository for SqlxSkillRepo {
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        let skills =
            sqlx::query_as::<_, Skill>("SELECT * FROM skills ORDER BY category ASC")
                .fetch_all(&self.pool)
                .await?;

        Ok(skills)
    }

    async fn get_skill_by_id(&self, id: &Uuid) -> Result<Skill, AppError> {
        let skill = sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill category not found".into()))?;

        Ok(skill)
    }

    async fn create_skill(&self, insert: &SkillInsert) -> Result<Skill, AppError> {
        let skill = sqlx::query_as::<_, Skill>(
            r#"
            INSERT INTO skills (category, skills, icon, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&insert.category)
        .bind(&insert.skills)
        .bind(&insert.icon)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(skill)
    }

    async fn update_skill(
        &self,
        id: &Uuid,
        patch: &UpdateSkillRequest,
    ) -> Result<Skill, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE skills SET updated_at = NOW()");

        if let Some(category) = &patch.category {
            builder.push(", category = ").push_bind(category);
        }
        if let Some(skills) = &patch.skills {
            builder.push(", skills = ").push_bind(skills);
        }
        if let Some(icon) = &patch.icon {
            builder.push(", icon = ").push_bind(icon);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let updated = builder
            .build_query_as::<Skill>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Skill category not found".into()))?;

        Ok(updated)
    }

    async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM skills WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Skill category not found".into()));
        }

        Ok(())
    }
}

#[async_trait]
impl<T> SkillRepository for Arc<T>
where
    T: SkillRepository + ?Sized,
{
    async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        (**self).list_skills().await
    }

    async fn get_skill_by_id(&self, id: &Uuid) -> Result<Skill, AppError> {
        (**self).get_skill_by_id(id).await
    }

    async fn create_skill(&self, insert: &SkillInsert) -> Result<Skill, AppError> {
        (**self).create_skill(insert).await
    }

    async fn update_skill(
        &self,
        id: &Uuid,
        patch: &UpdateSkillRequest,
    ) -> Result<Skill, AppError> {
        (**self).update_skill(id, patch).await
    }

    async fn delete_skill(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_skill(id).await
    }
}
