//! End-to-end tests for the facility endpoints and their expansions.

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

async fn create_owner(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
) -> i64 {
    let owner = post_entity(
        app,
        "/owners",
        json!({ "name": "ada lovelace", "email": "ada@example.com" }),
    )
    .await;
    owner["id"].as_i64().expect("owner id")
}

fn facility_body(owner_id: i64) -> Value {
    json!({
        "name": "iron temple",
        "street": "500 Capitol Mall",
        "city": "Sacramento",
        "state": "CALIFORNIA",
        "zip_code": "95814",
        "owner_id": owner_id,
    })
}

#[actix_web::test]
async fn creating_a_facility_derives_the_state_abbreviation() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;

    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;

    assert_eq!(facility["name"], "Iron Temple");
    assert_eq!(facility["state_abbr"], "CA");
    assert_eq!(facility["owner_id"], owner_id);
    assert_eq!(facility["manager_id"], Value::Null);
}

#[actix_web::test]
async fn mismatched_state_pair_is_rejected() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let mut body = facility_body(owner_id);
    body["state_abbr"] = json!("TX");

    let req = test::TestRequest::post()
        .uri("/facilities")
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(res).await;
    assert_eq!(error["details"]["errors"][0]["field"], "state_abbr");
}

#[actix_web::test]
async fn malformed_zip_code_is_rejected() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let mut body = facility_body(owner_id);
    body["zip_code"] = json!("9581");

    let req = test::TestRequest::post()
        .uri("/facilities")
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(res).await;
    assert_eq!(error["details"]["errors"][0]["field"], "zip_code");
}

#[actix_web::test]
async fn dangling_owner_reference_is_rejected() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());

    let req = test::TestRequest::post()
        .uri("/facilities")
        .set_json(facility_body(4711))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let error: Value = test::read_body_json(res).await;
    assert_eq!(error["message"], "referenced record does not exist");
}

#[actix_web::test]
async fn owner_expansion_nests_the_owner_record() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;
    let id = facility["id"].as_i64().expect("facility id");

    let req = test::TestRequest::get()
        .uri(&format!("/facilities/{id}/owner/"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], facility["id"]);
    assert_eq!(body["owner"]["id"], owner_id);
    assert_eq!(body["owner"]["name"], "Ada Lovelace");
}

#[actix_web::test]
async fn manager_expansion_is_null_when_unmanaged() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;
    let id = facility["id"].as_i64().expect("facility id");

    let req = test::TestRequest::get()
        .uri(&format!("/facilities/{id}/manager"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["manager"], Value::Null);
}

#[actix_web::test]
async fn staff_and_trainers_expansion_lists_both() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;
    let id = facility["id"].as_i64().expect("facility id");

    post_entity(
        &app,
        "/trainers",
        json!({ "name": "jane doe", "facility_id": id }),
    )
    .await;
    post_entity(
        &app,
        "/staff",
        json!({ "name": "sam porter", "email": "sam@example.com", "facility_id": id }),
    )
    .await;

    let req = test::TestRequest::get()
        .uri(&format!("/facilities/{id}/staff/trainers/"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["trainers"].as_array().expect("trainers").len(), 1);
    assert_eq!(body["staff"].as_array().expect("staff").len(), 1);
    assert_eq!(body["trainers"][0]["name"], "Jane Doe");
    assert_eq!(body["staff"][0]["name"], "Sam Porter");
}

#[actix_web::test]
async fn patching_city_alone_keeps_the_state_pair() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;
    let id = facility["id"].as_i64().expect("facility id");

    let req = test::TestRequest::patch()
        .uri(&format!("/facilities/{id}"))
        .set_json(json!({ "city": "Fresno" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["city"], "Fresno");
    assert_eq!(updated["state"], "CALIFORNIA");
    assert_eq!(updated["state_abbr"], "CA");
}

#[actix_web::test]
async fn patching_state_alone_rederives_the_abbreviation() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;
    let id = facility["id"].as_i64().expect("facility id");

    let req = test::TestRequest::patch()
        .uri(&format!("/facilities/{id}"))
        .set_json(json!({ "state": "TEXAS" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(res).await;
    assert_eq!(updated["state"], "TEXAS");
    assert_eq!(updated["state_abbr"], "TX");
}

#[actix_web::test]
async fn patching_a_non_corresponding_abbreviation_is_rejected() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;
    let id = facility["id"].as_i64().expect("facility id");

    let req = test::TestRequest::patch()
        .uri(&format!("/facilities/{id}"))
        .set_json(json!({ "state_abbr": "TX" }))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn deleting_a_facility_with_staff_is_a_conflict() {
    let (_guard, app) = spawn_app!(FixtureMxResolver::resolvable());
    let owner_id = create_owner(&app).await;
    let facility = post_entity(&app, "/facilities", facility_body(owner_id)).await;
    let id = facility["id"].as_i64().expect("facility id");
    post_entity(
        &app,
        "/staff",
        json!({ "name": "sam porter", "email": "sam@example.com", "facility_id": id }),
    )
    .await;

    let req = test::TestRequest::delete()
        .uri(&format!("/facilities/{id}"))
        .to_request();
    let res = test::call_service(&app, req).await;

    assert_eq!(res.status(), StatusCode::CONFLICT);
}
