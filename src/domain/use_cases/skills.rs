use chrono::Utc;
use validator::Validate;

use crate::{
    entities::skill::{NewSkillRequest, Skill, SkillInsert, UpdateSkillRequest},
    errors::AppError,
    repositories::skill::SkillRepository,
    utils::valid_uuid::valid_uuid,
};

pub struct SkillHandler<R>
where
    R: SkillRepository,
{
    pub skill_repo: R,
}

impl<R> SkillHandler<R>
where
    R: SkillRepository,
{
    pub fn new(skill_repo: R) -> Self {
        SkillHandler { skill_repo }
    }

    pub async fn list_skills(&self) -> Result<Vec<Skill>, AppError> {
        self.skill_repo.list_skills().await
    }

    pub async fn get_skill_by_id(&self, skill_id: &str) -> Result<Skill, AppError> {
        let id = valid_uuid(skill_id, "Skill category not found")?;
        self.skill_repo.get_skill_by_id(&id).await
    }

    pub async fn create_skill(&self, req: NewSkillRequest) -> Result<Skill, AppError> {
        req.validate()?;

        let insert = SkillInsert::from_request(req, Utc::now());
        self.skill_repo.create_skill(&insert).await
    }

    pub async fn update_skill(
        &self,
        skill_id: &str,
        patch: &UpdateSkillRequest,
    ) -> Result<Skill, AppError> {
        patch.validate()?;

        let id = valid_uuid(skill_id, "Skill category not found")?;
        self.skill_repo.update_skill(&id, patch).await
    }

    pub async fn delete_skill(&self, skill_id: &str) -> Result<(), AppError> {
        let id = valid_uuid(skill_id, "Skill category not found")?;
        self.skill_repo.delete_skill(&id).await
    }
}
