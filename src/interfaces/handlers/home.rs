use std::time::Duration;

use actix_web::{HttpResponse, Responder, get, web};
use humantime::format_duration;

use crate::{AppState, constants::START_TIME, repositories::project::ProjectRepository};

/// Public health check: process status plus store reachability.
#[get("/")]
pub async fn home(state: web::Data<AppState>) -> impl Responder {
    let database = match state.project_handler.project_repo.check_connection().await {
        Ok(_) => "connected",
        Err(_) => "disconnected",
    };

    let uptime_seconds = chrono::Utc::now()
        .signed_duration_since(*START_TIME)
        .num_seconds()
        .max(0) as u64;

    HttpResponse::Ok().json(serde_json::json!({
        "status": "API is running",
        "database": database,
        "version": env!("CARGO_PKG_VERSION"),
        "uptime": format_duration(Duration::from_secs(uptime_seconds)).to_string(),
    }))
}
