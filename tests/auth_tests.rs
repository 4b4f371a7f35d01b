
use actix_web::{http::StatusCode, test};
use serde_json::Value;
use test_utils::*;

#[actix_rt::test]
async fn home_is_reachable_without_a_token() {
    let mut project_repo = MockProjectRepo::new();
    project_repo.expect_check_connection().returning(|| Ok(()));

    let app = test_app!(test_state(
        project_repo,
        MockSkillRepo::new(),
        MockCertificationRepo::new(),
    ));

    let req = test::TestRequest::get().uri("/").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "API is running");
    assert_eq!(body["database"], "connected");
}

#[actix_rt::test]
async fn missing_token_is_rejected_with_401() {
    let app = test_app!(test_state(
        MockProjectRepo::new(),
        MockSkillRepo::new(),
        MockCertificationRepo::new(),
    ));

    let req = test::TestRequest::get().uri("/api/projects").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Access denied. No token provided.");
}

#[actix_rt::test]
async fn wrong_token_is_rejected_with_403() {
    let app = test_app!(test_state(
        MockProjectRepo::new(),
        MockSkillRepo::new(),
        MockCertificationRepo::new(),
    ));

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(("Authorization", "Bearer not-the-token"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"], "Invalid or expired token");
}

#[actix_rt::test]
async fn malformed_authorization_header_counts_as_missing() {
    let app = test_app!(test_state(
        MockProjectRepo::new(),
        MockSkillRepo::new(),
        MockCertificationRepo::new(),
    ));

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(("Authorization", TEST_TOKEN))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn valid_token_passes_the_gate() {
    let mut project_repo = MockProjectRepo::new();
    project_repo
        .expect_list_projects()
        .returning(|_| Ok(vec![]));

    let app = test_app!(test_state(
        project_repo,
        MockSkillRepo::new(),
        MockCertificationRepo::new(),
    ));

    let req = test::TestRequest::get()
        .uri("/api/projects")
        .insert_header(("Authorization", format!("Bearer {}", TEST_TOKEN)))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}
