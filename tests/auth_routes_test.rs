use actix_web::test;
use serde_json::json;

mod common;

#[actix_web::test]
async fn test_signup_returns_token() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "name": "New Traveler",
            "email": "new@example.com",
            "password": "secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["auth_token"].as_str().unwrap().len() > 0);
}

#[actix_web::test]
async fn test_signup_rejects_invalid_email() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "name": "Nope",
            "email": "not-an-email",
            "password": "secret123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_signup_rejects_duplicate() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "name": "Traveler",
            "email": common::demo_email(),
            "password": "whatever1"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 409);
}

#[actix_web::test]
async fn test_signin_demo_account() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({
            "email": common::demo_email(),
            "password": common::demo_password()
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert!(body["auth_token"].as_str().unwrap().len() > 0);
}

#[actix_web::test]
async fn test_signin_wrong_password() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({
            "email": common::demo_email(),
            "password": "wrong"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 401);
}

#[actix_web::test]
async fn test_signin_unknown_user() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({
            "email": "nobody@example.com",
            "password": "whatever"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_session_requires_token() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::get().uri("/api/auth/session").to_request();
    let resp = test::try_call_service(&app, req).await;
    assert!(resp.is_err(), "session without a token should be rejected");
}

#[actix_web::test]
async fn test_session_with_token() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/auth/session")
        .insert_header(("Authorization", format!("Bearer {}", common::demo_token())))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], common::demo_email());
    assert_eq!(body["name"], "Traveler");
}

#[actix_web::test]
async fn test_forgot_password_mock() {
    let app = test::init_service(common::create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/auth/forgot")
        .set_json(json!({"email": common::demo_email()}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/auth/forgot")
        .set_json(json!({"email": "nobody@example.com"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}
