use actix_web::{App, http::StatusCode, test, web};
use people_assign::assignments::PeopleAssignments;
use people_assign::entity::{ADMINISTRATOR_ID, OrganizationalEntity};
use people_assign::handlers;
use people_assign::models::{ParseResponse, ResolveResponse, StatusResponse, VersionResponse};
use people_assign::resolver::ResolverConfig;
use people_assign::state::{ResolverState, SharedResolverState};
use serde_json::{Value, json};
use std::sync::Arc;

fn create_test_state() -> SharedResolverState {
    Arc::new(ResolverState::default())
}

fn as_map(value: Value) -> serde_json::Map<String, Value> {
    value.as_object().cloned().expect("not an object")
}

#[actix_web::test]
async fn test_health_endpoint() {
    let app =
        test::init_service(App::new().route("/api/v1/health", web::get().to(handlers::health)))
            .await;

    let req = test::TestRequest::get().uri("/api/v1/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}

#[actix_web::test]
async fn test_status_endpoint() {
    let state = create_test_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::init),
    )
    .await;

    let req = test::TestRequest::get().uri("/api/v1/status").to_request();
    let body: StatusResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.administrator, ADMINISTRATOR_ID);
    assert_eq!(body.separator, ",");
    assert_eq!(body.parameter_keys.actor_id, "ActorId");
    assert_eq!(body.resolutions, 0);
}

#[actix_web::test]
async fn test_version_endpoint() {
    let app = test::init_service(App::new().configure(handlers::init)).await;

    let req = test::TestRequest::get().uri("/api/v1/version").to_request();
    let body: VersionResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!body.version.is_empty());
}

#[actix_web::test]
async fn test_resolve_fresh_task() {
    let state = create_test_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::init),
    )
    .await;

    let payload = json!({
        "parameters": {
            "ActorId": "espiegelberg,   drbug   ",
            "GroupId": "Software Developer,Project Manager",
            "BusinessAdministratorId": "espiegelberg",
            "RecipientId": null
        }
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .set_json(&payload)
        .to_request();
    let body: ResolveResponse = test::call_and_read_body_json(&app, req).await;

    let assignments = body.task.people_assignments.expect("no assignments");
    assert_eq!(
        assignments.potential_owners.as_slice(),
        &[
            OrganizationalEntity::user("espiegelberg"),
            OrganizationalEntity::user("drbug"),
            OrganizationalEntity::group("Software Developer"),
            OrganizationalEntity::group("Project Manager"),
        ]
    );
    assert_eq!(
        assignments.business_administrators.ids(),
        vec![ADMINISTRATOR_ID, "espiegelberg"]
    );
    assert!(assignments.recipients.is_empty());
    assert_eq!(
        body.task.task_data.created_by,
        Some(OrganizationalEntity::user("espiegelberg"))
    );
    assert_eq!(body.report.total_added(), 5);
    assert_eq!(state.resolutions(), 1);
}

#[actix_web::test]
async fn test_resolve_existing_task() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_test_state()))
            .configure(handlers::init),
    )
    .await;

    // The existing record lacks the administrator and already holds "john".
    let payload = json!({
        "parameters": { "ActorId": "john, mary", "BusinessAdministratorId": "drbug" },
        "task": {
            "people_assignments": {
                "potential_owners": [{ "kind": "user", "id": "john" }]
            }
        }
    });
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .set_json(&payload)
        .to_request();
    let body: ResolveResponse = test::call_and_read_body_json(&app, req).await;

    let assignments: PeopleAssignments = body.task.people_assignments.unwrap();
    assert_eq!(assignments.potential_owners.ids(), vec!["john", "mary"]);
    assert_eq!(
        assignments.business_administrators.ids(),
        vec![ADMINISTRATOR_ID, "drbug"]
    );
    assert_eq!(body.report.total_duplicates(), 1);
}

#[actix_web::test]
async fn test_resolve_rejects_non_string_parameter() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_test_state()))
            .configure(handlers::init),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .set_json(json!({ "parameters": { "ActorId": ["john"] } }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    let error = body["error"].as_str().unwrap();
    assert!(error.contains("ActorId"));
    assert!(error.contains("array"));
}

#[actix_web::test]
async fn test_resolve_rejects_malformed_json() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_test_state()))
            .configure(handlers::init),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"parameters\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("Invalid JSON payload"));
}

#[actix_web::test]
async fn test_custom_configuration() {
    let config = ResolverConfig {
        administrator: "root".to_string(),
        separator: ';',
        ..ResolverConfig::default()
    };
    let state = Arc::new(ResolverState::new(config).unwrap());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(handlers::init),
    )
    .await;

    let params = as_map(json!({ "TaskStakeholderId": "a,b; c" }));
    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .set_json(json!({ "parameters": params }))
        .to_request();
    let body: ResolveResponse = test::call_and_read_body_json(&app, req).await;

    let assignments = body.task.people_assignments.unwrap();
    assert_eq!(assignments.task_stakeholders.ids(), vec!["a,b", "c"]);
    assert_eq!(assignments.business_administrators.ids(), vec!["root"]);
}

#[actix_web::test]
async fn test_parse_entities() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_test_state()))
            .configure(handlers::init),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/entities")
        .set_json(json!({ "ids": " ops,, dev ,ops ", "kind": "group" }))
        .to_request();
    let body: ParseResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body.entities.as_slice(),
        &[OrganizationalEntity::group("ops"), OrganizationalEntity::group("dev")]
    );

    let req = test::TestRequest::post()
        .uri("/api/v1/entities")
        .set_json(json!({ "ids": null, "kind": "user" }))
        .to_request();
    let body: ParseResponse = test::call_and_read_body_json(&app, req).await;
    assert!(body.entities.is_empty());
}

#[actix_web::test]
async fn test_response_serialization_shape() {
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(create_test_state()))
            .configure(handlers::init),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/api/v1/assignments")
        .set_json(json!({ "parameters": { "RecipientId": "mary" } }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["task"]["people_assignments"]["recipients"],
        json!([{ "kind": "user", "id": "mary" }])
    );
    assert_eq!(body["report"]["added"]["recipients"], json!(1));
    assert_eq!(body["task"]["task_data"]["created_by"], Value::Null);
}
