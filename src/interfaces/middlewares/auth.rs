use actix_web::{
    Error, HttpResponse,
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ResponseError,
    web,
};
use futures_util::future::{LocalBoxFuture, Ready, ok};
use std::{
    rc::Rc,
    task::{Context, Poll},
};

use crate::{AppState, errors::AppError};

/// Static-token auth gate: one deployment-wide bearer secret, compared
/// for equality. No sessions, no identities.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let Some(state) = req.app_data::<web::Data<AppState>>() else {
                tracing::error!("AppState missing in auth middleware");
                let response = HttpResponse::InternalServerError()
                    .json(serde_json::json!({ "error": "Internal server error" }));
                return Ok(custom_error_response(req, response));
            };

            match extract_token(&req) {
                None => {
                    tracing::warn!("Missing or malformed Authorization header");
                    Ok(custom_error_response(
                        req,
                        AppError::MissingCredentials.error_response(),
                    ))
                }
                Some(token) if token == state.api_token => service.call(req).await,
                Some(_) => {
                    tracing::warn!("Rejected request with invalid token");
                    Ok(custom_error_response(
                        req,
                        AppError::InvalidCredentials.error_response(),
                    ))
                }
            }
        })
    }
}

fn is_public_route(path: &str, method: &str) -> bool {
    // CORS preflights never carry credentials
    if method == "OPTIONS" {
        return true;
    }

    matches!((path, method), ("/", "GET"))
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn custom_error_response(req: ServiceRequest, res: HttpResponse) -> ServiceResponse<BoxBody> {
    req.into_response(res)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn health_check_is_public() {
        assert!(is_public_route("/", "GET"));
        assert!(is_public_route("/api/projects", "OPTIONS"));
        assert!(!is_public_route("/api/projects", "GET"));
        assert!(!is_public_route("/api/skills", "POST"));
    }

    #[test]
    fn bearer_token_is_extracted_case_insensitively() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "BEARER sekrit"))
            .to_srv_request();
        assert_eq!(extract_token(&req).as_deref(), Some("sekrit"));
    }

    #[test]
    fn malformed_headers_yield_no_token() {
        let bare = TestRequest::default()
            .insert_header(("Authorization", "sekrit"))
            .to_srv_request();
        assert_eq!(extract_token(&bare), None);

        let wrong_scheme = TestRequest::default()
            .insert_header(("Authorization", "Basic sekrit"))
            .to_srv_request();
        assert_eq!(extract_token(&wrong_scheme), None);

        let missing = TestRequest::default().to_srv_request();
        assert_eq!(extract_token(&missing), None);
    }
}
