use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    entities::{
        certification::{Certification, CertificationInsert, CertificationPatch},
        patch::Patch,
    },
    errors::AppError,
    repositories::sqlx_repo::SqlxCertificationRepo,
};

#[async_trait]
pub trait CertificationRepository: Send + Sync {
    async fn list_certifications(&self) -> Result<Vec<Certification>, AppError>;
    async fn get_certification_by_id(&self, id: &Uuid) -> Result<Certification, AppError>;
    async fn create_certification(
        &self,
        insert: &CertificationInsert,
    ) -> Result<Certification, AppError>;
    async fn update_certification(
        &self,
        id: &Uuid,
        patch: &CertificationPatch,
    ) -> Result<Certification, AppError>;
    async fn delete_certification(&self, id: &Uuid) -> Result<(), AppError>;
}

impl SqlxCertificationRepo {
    pub fn new(pool: sqlx::PgPool) -> Self {
        SqlxCertificationRepo { pool }
    }
}

#[async_trait]
impl CertificationRepository for SqlxCertificationRepo {
    async fn list_certifications(&self) -> Result<Vec<Certification>, AppError> {
        let certifications = sqlx::query_as::<_, Certification>(
            "SELECT * FROM certifications ORDER BY issue_date DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(certifications)
    }

    async fn get_certification_by_id(&self, id: &Uuid) -> Result<Certification, AppError> {
        let certification =
            sqlx::query_as::<_, Certification>("SELECT * FROM certifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?
                .ok_or_else(|| AppError::NotFound("Certification not found".into()))?;

        Ok(certification)
    }

    async fn create_certification(
        &self,
        insert: &CertificationInsert,
    ) -> Result<Certification, AppError> {
        let certification = sqlx::query_as::<_, Certification>(
            r#"
            INSERT INTO certifications (
                title, issuing_organization, issue_date, expiration_date,
                credential_id, credential_url, skills, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&insert.title)
        .bind(&insert.issuing_organization)
        .bind(insert.issue_date)
        .bind(insert.expiration_date)
        .bind(&insert.credential_id)
        .bind(&insert.credential_url)
        .bind(&insert.skills)
        .bind(insert.created_at)
        .bind(insert.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(certification)
    }

    async fn update_certification(
        &self,
        id: &Uuid,
        patch: &CertificationPatch,
    ) -> Result<Certification, AppError> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new("UPDATE certifications SET updated_at = NOW()");

        if let Some(title) = &patch.title {
            builder.push(", title = ").push_bind(title);
        }
        if let Some(organization) = &patch.issuing_organization {
            builder
                .push(", issuing_organization = ")
                .push_bind(organization);
        }
        if let Some(issue_date) = patch.issue_date {
            builder.push(", issue_date = ").push_bind(issue_date);
        }
        match &patch.expiration_date {
            Patch::Absent => {}
            Patch::Null => {
                builder.push(", expiration_date = NULL");
            }
            Patch::Value(date) => {
                builder.push(", expiration_date = ").push_bind(date);
            }
        }
        match &patch.credential_id {
            Patch::Absent => {}
            Patch::Null => {
                builder.push(", credential_id = NULL");
            }
            Patch::Value(credential_id) => {
                builder.push(", credential_id = ").push_bind(credential_id);
            }
        }
        if let Some(credential_url) = &patch.credential_url {
            builder.push(", credential_url = ").push_bind(credential_url);
        }
        if let Some(skills) = &patch.skills {
            builder.push(", skills = ").push_bind(skills);
        }

        builder.push(" WHERE id = ").push_bind(id);
        builder.push(" RETURNING *");

        let updated = builder
            .build_query_as::<Certification>()
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Certification not found".into()))?;

        Ok(updated)
    }

    async fn delete_certification(&self, id: &Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM certifications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Certification not found".into()));
        }

        Ok(())
    }
}

#[async_trait]
impl<T> CertificationRepository for Arc<T>
where
    T: CertificationRepository + ?Sized,
{
    async fn list_certifications(&self) -> Result<Vec<Certification>, AppError> {
        (**self).list_certifications().await
    }

    async fn get_certification_by_id(&self, id: &Uuid) -> Result<Certification, AppError> {
        (**self).get_certification_by_id(id).await
    }

    async fn create_certification(
        &self,
        insert: &CertificationInsert,
    ) -> Result<Certification, AppError> {
        (**self).create_certification(insert).await
    }

    async fn update_certification(
        &self,
        id: &Uuid,
        patch: &CertificationPatch,
    ) -> Result<Certification, AppError> {
        (**self).update_certification(id, patch).await
    }

    async fn delete_certification(&self, id: &Uuid) -> Result<(), AppError> {
        (**self).delete_certification(id).await
    }
}
