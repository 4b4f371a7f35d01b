
use actix_web::{http::StatusCode, test};
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

fn authed(req: test::TestRequest) -> test::TestRequest {
    req.insert_header(("Authorization", format!("Bearer {}", TEST_TOKEN)))
}

#[actix_rt::test]
async fn create_skill_defaults_the_icon_to_empty() {
    let id = Uuid::new_v4();
    let mut skill_repo = MockSkillRepo::new();
    skill_repo
        .expect_create_skill()
        .withf(|insert| insert.category == "Backend" && insert.icon.is_empty())
        .returning(move |_| {
            let mut skill = sample_skill(id);
            skill.icon = String::new();
            Ok(skill)
        });

    let app = test_app!(test_state(
        MockProjectRepo::new(),
        skill_repo,
        MockCertificationRepo::new(),
    ));

    let req = authed(test::TestRequest::post().uri("/api/skills"))
        .set_json(json!({
            "category": "Backend",
            "skills": ["Rust", "SQL"]
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["category"], "Backend");
    assert_eq!(body["icon"], "");
}

#[actix_rt::test]
async fn create_skill_without_entries_is_rejected() {
    let mut skill_repo = MockSkillRepo::new();
    skill_repo.expect_create_skill().never();

    let app = test_app!(test_state(
        MockProjectRepo::new(),
        skill_repo,
        MockCertificationRepo::new(),
    ));

    let req = authed(test::TestRequest::post().uri("/api/skills"))
        .set_json(json!({ "category": "Backend", "skills": [] }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(res).await;
    let messages = body["error"].as_array().expect("error should be a list");
    assert!(messages.contains(&json!("At least one skill is required")));
}

#[actix_rt::test]
async fn update_skill_replaces_the_list_wholesale() {
    let id = Uuid::new_v4();
    let mut skill_repo = MockSkillRepo::new();
    skill_repo
        .expect_update_skill()
        .withf(move |got_id, patch| {
            *got_id == id && patch.skills.as_deref() == Some(&["Zig".to_string()][..])
        })
        .returning(move |got_id, _| {
            let mut skill = sample_skill(*got_id);
            skill.skills = vec!["Zig".into()];
            Ok(skill)
        });

    let app = test_app!(test_state(
        MockProjectRepo::new(),
        skill_repo,
        MockCertificationRepo::new(),
    ));

    let req = authed(test::TestRequest::put().uri(&format!("/api/skills/{id}")))
        .set_json(json!({ "skills": ["Zig"] }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["skills"], json!(["Zig"]));
}

#[actix_rt::test]
async fn delete_skill_reports_category_removal() {
    let id = Uuid::new_v4();
    let mut skill_repo = MockSkillRepo::new();
    skill_repo.expect_delete_skill().returning(|_| Ok(()));

    let app = test_app!(test_state(
        MockProjectRepo::new(),
        skill_repo,
        MockCertificationRepo::new(),
    ));

    let req = authed(test::TestRequest::delete().uri(&format!("/api/skills/{id}"))).to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Skill category removed successfully");
}
