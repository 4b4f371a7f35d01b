use actix_web::{HttpResponse, ResponseError, error::JsonPayloadError, http::StatusCode, web};
use derive_more::Display;
use serde_json::json;

/// Malformed JSON bodies get the same `{"error": ...}` shape as every
/// other failure instead of actix's plain-text default.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| JsonError::from(err).into()));
}

#[derive(Debug, Display)]
#[display("{message}")]
pub struct JsonError {
    message: String,
}

impl ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.message }))
    }
}

impl From<JsonPayloadError> for JsonError {
    fn from(err: JsonPayloadError) -> Self {
        JsonError {
            message: format!("JSON payload error: {}", err),
        }
    }
}
