//! End-to-end HTTP tests against the fully wired application.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::web;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use cake_manager::inbound::http::auth::{Account, AccountDirectory, Role};
use cake_manager::inbound::http::health::HealthState;
use cake_manager::middleware::CONTENT_SECURITY_POLICY;
use cake_manager::outbound::memory::InMemoryCakeRepository;
use cake_manager::server::{build_app, http_state_with};
use rstest::rstest;
use serde_json::{Value, json};

const ADMIN: (&str, &str) = ("cakemanager", "letmein");
const CUSTOMER: (&str, &str) = ("cakeuser", "crumbs");

fn basic_auth((username, password): (&str, &str)) -> (header::HeaderName, String) {
    let encoded = STANDARD.encode(format!("{username}:{password}"));
    (header::AUTHORIZATION, format!("Basic {encoded}"))
}

async fn init_app()
-> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error> {
    let accounts = AccountDirectory::new([
        Account::new(ADMIN.0, ADMIN.1, Role::Admin),
        Account::new(CUSTOMER.0, CUSTOMER.1, Role::Customer),
    ]);
    let health = web::Data::new(HealthState::new());
    health.mark_ready();
    let state = web::Data::new(http_state_with(InMemoryCakeRepository::new(), accounts));
    test::init_service(build_app(health, state)).await
}

#[actix_web::test]
async fn cake_lifecycle_over_http() {
    let app = init_app().await;

    let created = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/v1/cakes")
            .insert_header(basic_auth(ADMIN))
            .set_json(json!({ "name": "Chocolate", "price": 9.99, "description": "Rich chocolate cake" }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    let location = created
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("location header")
        .to_owned();
    assert_eq!(location, "/api/v1/cakes/1");

    let fetched: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri(&location)
            .insert_header(basic_auth(CUSTOMER))
            .to_request(),
    )
    .await;
    assert_eq!(
        fetched,
        json!({ "id": 1, "name": "Chocolate", "price": 9.99, "description": "Rich chocolate cake" })
    );

    let updated: Value = test::call_and_read_body_json(
        &app,
        TestRequest::put()
            .uri(&location)
            .insert_header(basic_auth(ADMIN))
            .set_json(json!({ "name": "Fudge", "price": 12 }))
            .to_request(),
    )
    .await;
    assert_eq!(updated, json!({ "id": 1, "name": "Fudge", "price": 12.0 }));

    let deleted = test::call_service(
        &app,
        TestRequest::delete()
            .uri(&location)
            .insert_header(basic_auth(ADMIN))
            .to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let missing = test::call_service(
        &app,
        TestRequest::get()
            .uri(&location)
            .insert_header(basic_auth(ADMIN))
            .to_request(),
    )
    .await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn script_names_are_returned_escaped() {
    let app = init_app().await;

    let created = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/v1/cakes")
            .insert_header(basic_auth(ADMIN))
            .set_json(json!({ "name": "<script>alert(1)</script>", "price": 1 }))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);

    let listed: Value = test::call_and_read_body_json(
        &app,
        TestRequest::get()
            .uri("/api/v1/cakes")
            .insert_header(basic_auth(ADMIN))
            .to_request(),
    )
    .await;
    assert_eq!(
        listed.pointer("/0/name").and_then(Value::as_str),
        Some("&lt;script&gt;alert(1)&lt;/script&gt;")
    );
}

#[actix_web::test]
async fn validation_failures_list_every_violation() {
    let app = init_app().await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/v1/cakes")
            .insert_header(basic_auth(ADMIN))
            .set_json(json!({ "name": "", "price": -1 }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body.get("errors"),
        Some(&json!([
            "name: Cake name must not be blank",
            "price: Cake price must be greater than zero"
        ]))
    );
}

#[rstest]
#[case(json!(0.004))]
#[case(json!(100_000_000))]
#[actix_web::test]
async fn unstorable_prices_are_bad_requests(#[case] price: Value) {
    let app = init_app().await;

    let res = test::call_service(
        &app,
        TestRequest::post()
            .uri("/api/v1/cakes")
            .insert_header(basic_auth(ADMIN))
            .set_json(json!({ "name": "Tart", "price": price }))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case("/api/v1/cakes")]
#[case("/health/live")]
#[actix_web::test]
async fn responses_carry_trace_and_security_headers(#[case] uri: &str) {
    let app = init_app().await;

    let res = test::call_service(&app, TestRequest::get().uri(uri).to_request()).await;

    assert!(res.headers().contains_key("trace-id"));
    assert_eq!(
        res.headers()
            .get("content-security-policy")
            .and_then(|value| value.to_str().ok()),
        Some(CONTENT_SECURITY_POLICY)
    );
    assert_eq!(
        res.headers()
            .get("x-frame-options")
            .and_then(|value| value.to_str().ok()),
        Some("DENY")
    );
}

#[actix_web::test]
async fn unauthenticated_errors_echo_the_trace_id() {
    let app = init_app().await;

    let res = test::call_service(&app, TestRequest::get().uri("/api/v1/cakes").to_request()).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let header_id = res
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .expect("trace id header")
        .to_owned();
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body.get("traceId").and_then(Value::as_str), Some(header_id.as_str()));
}

#[actix_web::test]
async fn readiness_probe_reports_ready() {
    let app = init_app().await;

    let res = test::call_service(&app, TestRequest::get().uri("/health/ready").to_request()).await;

    assert_eq!(res.status(), StatusCode::OK);
}
