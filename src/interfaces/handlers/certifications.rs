use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

use crate::{
    AppState,
    entities::certification::{NewCertificationRequest, UpdateCertificationRequest},
    errors::AppError,
};

#[instrument(skip(state))]
pub async fn list_certifications(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let certifications = state.certification_handler.list_certifications().await?;
    Ok(HttpResponse::Ok().json(certifications))
}

#[instrument(skip(state))]
pub async fn get_certification_by_id(
    state: web::Data<AppState>,
    certification_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let certification = state
        .certification_handler
        .get_certification_by_id(&certification_id)
        .await?;
    Ok(HttpResponse::Ok().json(certification))
}

#[instrument(skip(state, data))]
pub async fn create_certification(
    state: web::Data<AppState>,
    data: web::Json<NewCertificationRequest>,
) -> Result<impl Responder, AppError> {
    let certification = state
        .certification_handler
        .create_certification(data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(certification))
}

#[instrument(skip(state, data))]
pub async fn update_certification(
    state: web::Data<AppState>,
    certification_id: web::Path<String>,
    data: web::Json<UpdateCertificationRequest>,
) -> Result<impl Responder, AppError> {
    let certification = state
        .certification_handler
        .update_certification(&certification_id, data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(certification))
}

#[instrument(skip(state))]
pub async fn delete_certification(
    state: web::Data<AppState>,
    certification_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    state
        .certification_handler
        .delete_certification(&certification_id)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Certification removed",
    })))
}
