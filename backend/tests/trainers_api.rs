//! End-to-end tests for the trainer endpoints and their expansions.

mod support;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, middleware, test, web};
use serde_json::{Value, json};

use gym_backend::domain::ports::FixtureMxResolver;
use gym_backend::inbound::http::routes;

macro_rules! spawn_app {
    ($resolver:expr) => {{
        let (guard, state) = support::test_state($resolver);
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(middleware::NormalizePath::trim())
                .configure(routes),
        )
        .await;
        (guard, app)
    }};
}

async fn post_entity(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    uri: &str,
    body: Value,
) -> Value {
    let req = test::TestRequest::post().uri(uri).set_json(body).to_request();
    let res = test::call_service(app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED, "create at {uri}");
    test::read_body_json(res).await
}

#[actix_web::test]
async fn creating_a_trainer_without_email_skips_the_mx_check() {
    // An unresolvable resolver must not matter when no email is supplied.
    let (_guard, app) = spawn_app!(FixtureMxResolver::unresolvable());

    let trainer = post_entity(&app, "/trainers", json!({ "name": "jane doe" })).await;

    assert_eq!(trainer["name"], "Jane Doe");
    assert_eq!(trainer["email"], Value::Null);
    assert_eq!(trainer["role"], "Trainer");
    assert!(trainer["employment_date"].as_str().is_some());
}

#[actix_web::test]
async fn supplied_employment_date_is_stored() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());

    let trainer = post_entity(
        &app,
        "/trainers",
        json!({
            "name": "jane doe",
            "bio": "Former powerlifter",
            "employment_date": "2024-01-03T17:44:54Z",
        }),
    )
    .await;

    assert_eq!(trainer["bio"], "Former powerlifter");
    let stored = trainer["employment_date"].as_str().expect("date");
    assert!(stored.starts_with("2024-01-03T17:44:54"));
}

#[actix_web::test]
async fn facility_expansion_nests_the_facility() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner = post_entity(
        &app,
        "/owners",
        json!({ "name": "ada lovelace", "email": "ada@example.com" }),
    )
    .await;
    let facility = post_entity(
        &app,
        "/facilities",
        json!({
            "name": "iron temple",
            "street": "500 Capitol Mall",
            "city": "Sacramento",
            "state": "CALIFORNIA",
            "zip_code": "95814",
            "owner_id": owner["id"],
        }),
    )
    .await;
    let trainer = post_entity(
        &app,
        "/trainers",
        json!({ "name": "jane doe", "facility_id": facility["id"] }),
    )
    .await;
    let id = trainer["id"].as_i64().expect("trainer id");

    let req = test::TestRequest::get()
        .uri(&format!("/trainers/{id}/facility/"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["facility"]["id"], facility["id"]);
    assert_eq!(body["facility"]["name"], "Iron Temple");
}

#[actix_web::test]
async fn owner_expansion_is_null_when_unattached() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let trainer = post_entity(&app, "/trainers", json!({ "name": "jane doe" })).await;
    let id = trainer["id"].as_i64().expect("trainer id");

    let req = test::TestRequest::get()
        .uri(&format!("/trainers/{id}/owner"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["owner"], Value::Null);
}

#[actix_web::test]
async fn expansion_of_a_missing_trainer_is_not_found() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());

    let req = test::TestRequest::get()
        .uri("/trainers/4711/manager")
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["message"], "Trainer not found");
}

#[actix_web::test]
async fn explicit_null_patch_clears_the_email() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let trainer = post_entity(
        &app,
        "/trainers",
        json!({ "name": "jane doe", "email": "jane@example.com" }),
    )
    .await;
    let id = trainer["id"].as_i64().expect("trainer id");

    let req = test::TestRequest::patch()
        .uri(&format!("/trainers/{id}"))
        .set_json(json!({ "email": null }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["email"], Value::Null);
    assert_eq!(updated["name"], "Jane Doe");
}

#[actix_web::test]
async fn patching_email_to_a_value_runs_the_mx_check() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::unresolvable());

    let req = test::TestRequest::patch()
        .uri("/trainers/1")
        .set_json(json!({ "email": "jane@nowhere.invalid" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn reassigning_a_trainer_to_a_facility_via_patch() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner = post_entity(
        &app,
        "/owners",
        json!({ "name": "ada lovelace", "email": "ada@example.com" }),
    )
    .await;
    let facility = post_entity(
        &app,
        "/facilities",
        json!({
            "name": "iron temple",
            "street": "500 Capitol Mall",
            "city": "Sacramento",
            "state": "CALIFORNIA",
            "zip_code": "95814",
            "owner_id": owner["id"],
        }),
    )
    .await;
    let trainer = post_entity(&app, "/trainers", json!({ "name": "jane doe" })).await;
    let id = trainer["id"].as_i64().expect("trainer id");

    let req = test::TestRequest::patch()
        .uri(&format!("/trainers/{id}"))
        .set_json(json!({ "facility_id": facility["id"] }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["facility_id"], facility["id"]);
}
