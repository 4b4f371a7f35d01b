use chrono::Utc;
use validator::Validate;

use crate::{
    entities::certification::{
        Certification, CertificationInsert, CertificationPatch, NewCertificationRequest,
        SkillsInput, UpdateCertificationRequest,
    },
    errors::AppError,
    repositories::certification::CertificationRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct CertificationHandler<R>
where
    R: CertificationRepository,
{
    pub certification_repo: R,
}

impl<R> CertificationHandler<R>
where
    R: CertificationRepository,
{
    pub fn new(certification_repo: R) -> Self {
        CertificationHandler { certification_repo }
    }

    pub async fn list_certifications(&self) -> Result<Vec<Certification>, AppError> {
        self.certification_repo.list_certifications().await
    }

    pub async fn get_certification_by_id(
        &self,
        certification_id: &str,
    ) -> Result<Certification, AppError> {
        let id = valid_uuid(certification_id, "Certification not found")?;
        self.certification_repo.get_certification_by_id(&id).await
    }

    /// Validates, normalizes the comma-separated skills form, stamps
    /// timestamps, and inserts.
    pub async fn create_certification(
        &self,
        req: NewCertificationRequest,
    ) -> Result<Certification, AppError> {
        req.validate()?;

        let now = Utc::now();
        let insert = CertificationInsert {
            title: req.title,
            issuing_organization: req.issuing_organization,
            // presence enforced by validation above
            issue_date: req
                .issue_date
                .ok_or_else(|| AppError::validation("issueDate", "Issue date is required"))?,
            expiration_date: req.expiration_date,
            credential_id: req.credential_id,
            credential_url: req.credential_url,
            skills: req.skills.map(SkillsInput::into_vec).unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        self.certification_repo.create_certification(&insert).await
    }

    pub async fn update_certification(
        &self,
        certification_id: &str,
        req: UpdateCertificationRequest,
    ) -> Result<Certification, AppError> {
        req.validate()?;

        let id = valid_uuid(certification_id, "Certification not found")?;
        let patch = CertificationPatch::from(req);
        self.certification_repo
            .update_certification(&id, &patch)
            .await
    }

    pub async fn delete_certification(&self, certification_id: &str) -> Result<(), AppError> {
        let id = valid_uuid(certification_id, "Certification not found")?;
        self.certification_repo.delete_certification(&id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::patch::Patch;
    use mockall::mock;
    use uuid::Uuid;

    mock! {
        Repo {}

        #[async_trait::async_trait]
        impl CertificationRepository for Repo {
            async fn list_certifications(&self) -> Result<Vec<Certification>, AppError>;
            async fn get_certification_by_id(&self, id: &Uuid) -> Result<Certification, AppError>;
            async fn create_certification(&self, insert: &CertificationInsert) -> Result<Certification, AppError>;
            async fn update_certification(&self, id: &Uuid, patch: &CertificationPatch) -> Result<Certification, AppError>;
            async fn delete_certification(&self, id: &Uuid) -> Result<(), AppError>;
        }
    }

    fn stored(insert: &CertificationInsert) -> Certification {
        Certification {
            id: Uuid::new_v4(),
            title: insert.title.clone(),
            issuing_organization: insert.issuing_organization.clone(),
            issue_date: insert.issue_date,
            expiration_date: insert.expiration_date,
            credential_id: insert.credential_id.clone(),
            credential_url: insert.credential_url.clone(),
            skills: insert.skills.clone(),
            created_at: insert.created_at,
            updated_at: insert.updated_at,
        }
    }

    #[actix_rt::test]
    async fn create_splits_comma_separated_skills() {
        let mut repo = MockRepo::new();
        repo.expect_create_certification()
            .withf(|insert| insert.skills == vec!["cloud", "terraform"])
            .returning(|insert| Ok(stored(insert)));

        let handler = CertificationHandler::new(repo);
        let req: NewCertificationRequest = serde_json::from_value(serde_json::json!({
            "title": "Solutions Architect",
            "issuingOrganization": "AWS",
            "issueDate": "2024-03-01T00:00:00Z",
            "skills": "cloud, terraform"
        }))
        .unwrap();

        let cert = handler.create_certification(req).await.unwrap();
        assert_eq!(cert.skills, vec!["cloud", "terraform"]);
    }

    #[actix_rt::test]
    async fn explicit_null_expiration_reaches_the_store_as_clear() {
        let id = Uuid::new_v4();
        let mut repo = MockRepo::new();
        repo.expect_update_certification()
            .withf(|_, patch| {
                patch.expiration_date.is_null()
                    && patch.credential_id.is_absent()
                    && patch.title.is_none()
            })
            .returning(|id, _| {
                Ok(Certification {
                    id: *id,
                    title: "Cert".into(),
                    issuing_organization: "Org".into(),
                    issue_date: Utc::now(),
                    expiration_date: None,
                    credential_id: Some("abc".into()),
                    credential_url: None,
                    skills: vec![],
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let handler = CertificationHandler::new(repo);
        let req: UpdateCertificationRequest =
            serde_json::from_str(r#"{"expirationDate": null}"#).unwrap();

        let updated = handler
            .update_certification(&id.to_string(), req)
            .await
            .unwrap();
        assert_eq!(updated.expiration_date, None);
        assert_eq!(updated.credential_id.as_deref(), Some("abc"));
    }

    #[actix_rt::test]
    async fn update_accepts_csv_skills_too() {
        let id = Uuid::new_v4();
        let mut repo = MockRepo::new();
        repo.expect_update_certification()
            .withf(|_, patch| patch.skills.as_deref() == Some(&["a".to_string(), "b".to_string()][..]))
            .returning(|id, patch| {
                Ok(Certification {
                    id: *id,
                    title: "Cert".into(),
                    issuing_organization: "Org".into(),
                    issue_date: Utc::now(),
                    expiration_date: None,
                    credential_id: None,
                    credential_url: None,
                    skills: patch.skills.clone().unwrap(),
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
            });

        let handler = CertificationHandler::new(repo);
        let req: UpdateCertificationRequest =
            serde_json::from_value(serde_json::json!({ "skills": "a, b" })).unwrap();

        let updated = handler
            .update_certification(&id.to_string(), req)
            .await
            .unwrap();
        assert_eq!(updated.skills, vec!["a", "b"]);
    }

    #[actix_rt::test]
    async fn missing_issue_date_never_reaches_the_store() {
        let mut repo = MockRepo::new();
        repo.expect_create_certification().never();

        let handler = CertificationHandler::new(repo);
        let req: NewCertificationRequest = serde_json::from_value(serde_json::json!({
            "title": "Cert",
            "issuingOrganization": "Org"
        }))
        .unwrap();

        let err = handler.create_certification(req).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
    }
}
