use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

use crate::{
    AppState,
    entities::skill::{NewSkillRequest, UpdateSkillRequest},
    errors::AppError,
};

#[instrument(skip(state))]
pub async fn list_skills(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let skills = state.skill_handler.list_skills().await?;
    Ok(HttpResponse::Ok().json(skills))
}

#[instrument(skip(state))]
pub async fn get_skill_by_id(
    state: web::Data<AppState>,
    skill_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.get_skill_by_id(&skill_id).await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(state, data))]
pub async fn create_skill(
    state: web::Data<AppState>,
    data: web::Json<NewSkillRequest>,
) -> Result<impl Responder, AppError> {
    let skill = state.skill_handler.create_skill(data.into_inner()).await?;
    Ok(HttpResponse::Created().json(skill))
}

#[instrument(skip(state, data))]
pub async fn update_skill(
    state: web::Data<AppState>,
    skill_id: web::Path<String>,
    data: web::Json<UpdateSkillRequest>,
) -> Result<impl Responder, AppError> {
    let skill = state
        .skill_handler
        .update_skill(&skill_id, &data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(skill))
}

#[instrument(skip(state))]
pub async fn delete_skill(
    state: web::Data<AppState>,
    skill_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state.skill_handler.delete_skill(&skill_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Skill category removed successfully",
    })))
}
