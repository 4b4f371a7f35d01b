use actix_web::{HttpResponse, Responder, web};
use tracing::instrument;

use crate::{
    AppState,
    entities::project::{NewProjectRequest, ProjectFilter, UpdateProjectRequest},
    errors::AppError,
};

#[instrument(skip(state, filter))]
pub async fn list_projects(
    state: web::Data<AppState>,
    filter: web::Query<ProjectFilter>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.list_projects(&filter).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn search_projects(
    state: web::Data<AppState>,
    keyword: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let projects = state.project_handler.search_projects(&keyword).await?;
    Ok(HttpResponse::Ok().json(projects))
}

#[instrument(skip(state))]
pub async fn get_project_by_id(
    state: web::Data<AppState>,
    project_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let project = state.project_handler.get_project_by_id(&project_id).await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state, data))]
pub async fn create_project(
    state: web::Data<AppState>,
    data: web::Json<NewProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .create_project(data.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(project))
}

#[instrument(skip(state, data))]
pub async fn update_project(
    state: web::Data<AppState>,
    project_id: web::Path<String>,
    data: web::Json<UpdateProjectRequest>,
) -> Result<impl Responder, AppError> {
    let project = state
        .project_handler
        .update_project(&project_id, &data.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(project))
}

#[instrument(skip(state))]
pub async fn delete_project(
    state: web::Data<AppState>,
    project_id: web::Path<String>,
) -> Result<impl Responder, AppError> {
    let project_id = project_id.into_inner();
    state.project_handler.delete_project(&project_id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Project deleted successfully",
        "id": project_id,
    })))
}
