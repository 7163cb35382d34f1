//! Integration tests for the user API surface
mod common;

use actix_web::{App, test, web};
use uuid::Uuid;

use common::{TestContext, login_body, register_body};
use userbase::adapters::http::configure_user_routes;
use userbase::domain::account::ports::UserRepository;

macro_rules! init_app {
  ($ctx:expr) => {
    test::init_service(
      App::new()
        .service(web::scope("/users").configure(|cfg| configure_user_routes(cfg, $ctx.deps))),
    )
    .await
  };
}

#[actix_web::test]
async fn test_register_creates_unverified_user() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), 201);

  let json: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(json["data"]["email"], "ada@example.com");
  assert_eq!(json["data"]["isVerified"], false);
  // The password never comes back in any spelling
  assert!(json["data"].get("password").is_none());
  assert!(json["data"].get("passwordHash").is_none());
}

#[actix_web::test]
async fn test_register_duplicate_email_is_rejected() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 201);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_register_malformed_body_is_rejected() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(serde_json::json!({
      "firstName": "Ada",
      "lastName": "Lovelace",
      "email": "not-an-email",
      "password": "short",
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), 400);
}

#[actix_web::test]
async fn test_login_failures_are_indistinguishable() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  test::call_service(&app, req).await;

  // Wrong password for a known email
  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(serde_json::json!({
      "email": "ada@example.com",
      "password": "not the password",
    }))
    .to_request();
  let wrong_password = test::call_service(&app, req).await;
  assert_eq!(wrong_password.status(), 404);
  let wrong_password: serde_json::Value = test::read_body_json(wrong_password).await;

  // Unknown email entirely
  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(login_body("nobody@example.com"))
    .to_request();
  let unknown_email = test::call_service(&app, req).await;
  assert_eq!(unknown_email.status(), 404);
  let unknown_email: serde_json::Value = test::read_body_json(unknown_email).await;

  // Identical bodies: nothing distinguishes the two failures
  assert_eq!(wrong_password, unknown_email);
}

#[actix_web::test]
async fn test_protected_routes_require_bearer_token() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::get().uri("/users").to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 401);

  let req = test::TestRequest::post()
    .uri("/users/request-verification-code")
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 401);

  let req = test::TestRequest::get()
    .uri("/users")
    .insert_header(("Authorization", "Bearer garbled"))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 401);
}

#[actix_web::test]
async fn test_full_verification_scenario() {
  let ctx = TestContext::new();
  let user_repo = ctx.user_repo.clone();
  let app = init_app!(ctx);

  // register
  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("a@x.com"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 201);
  let json: serde_json::Value = test::read_body_json(resp).await;
  let user_id = Uuid::parse_str(json["data"]["id"].as_str().unwrap()).unwrap();

  // login -> token
  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(login_body("a@x.com"))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let json: serde_json::Value = test::read_body_json(resp).await;
  let token = json["data"]["token"].as_str().unwrap().to_string();

  // request verification code; the response carries no code
  let req = test::TestRequest::post()
    .uri("/users/request-verification-code")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let json: serde_json::Value = test::read_body_json(resp).await;
  assert!(json.get("data").is_none());

  // the stored code is only observable through the repository
  let code = user_repo
    .find_by_id(user_id)
    .await
    .unwrap()
    .unwrap()
    .verification_code
    .unwrap();

  // verify with the issued code
  let req = test::TestRequest::put()
    .uri("/users/verify-user")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .set_json(serde_json::json!({ "code": code }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let json: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(json["data"]["isVerified"], true);

  // the same code again fails: it was consumed
  let req = test::TestRequest::put()
    .uri("/users/verify-user")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .set_json(serde_json::json!({ "code": code }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 500);
}

#[actix_web::test]
async fn test_reissued_code_invalidates_the_first() {
  let ctx = TestContext::new();
  let user_repo = ctx.user_repo.clone();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let user_id = Uuid::parse_str(json["data"]["id"].as_str().unwrap()).unwrap();

  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(login_body("ada@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let token = json["data"]["token"].as_str().unwrap().to_string();

  let req = test::TestRequest::post()
    .uri("/users/request-verification-code")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  test::call_service(&app, req).await;
  let first_code = user_repo
    .find_by_id(user_id)
    .await
    .unwrap()
    .unwrap()
    .verification_code
    .unwrap();

  let req = test::TestRequest::post()
    .uri("/users/request-verification-code")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  test::call_service(&app, req).await;
  let second_code = user_repo
    .find_by_id(user_id)
    .await
    .unwrap()
    .unwrap()
    .verification_code
    .unwrap();

  if first_code != second_code {
    let req = test::TestRequest::put()
      .uri("/users/verify-user")
      .insert_header(("Authorization", format!("Bearer {token}")))
      .set_json(serde_json::json!({ "code": first_code }))
      .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 500);
  }

  let req = test::TestRequest::put()
    .uri("/users/verify-user")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .set_json(serde_json::json!({ "code": second_code }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 200);
}

#[actix_web::test]
async fn test_verify_without_issued_code_fails() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  test::call_service(&app, req).await;

  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(login_body("ada@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let token = json["data"]["token"].as_str().unwrap().to_string();

  let req = test::TestRequest::put()
    .uri("/users/verify-user")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .set_json(serde_json::json!({ "code": "000000" }))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 500);
}

#[actix_web::test]
async fn test_user_crud_round_trip() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let user_id = json["data"]["id"].as_str().unwrap().to_string();

  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(login_body("ada@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let token = json["data"]["token"].as_str().unwrap().to_string();

  // list
  let req = test::TestRequest::get()
    .uri("/users")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let json: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(json["data"].as_array().unwrap().len(), 1);

  // get by id
  let req = test::TestRequest::get()
    .uri(&format!("/users/{user_id}"))
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);

  // update: names change, verification state is untouchable
  let req = test::TestRequest::put()
    .uri(&format!("/users/{user_id}"))
    .insert_header(("Authorization", format!("Bearer {token}")))
    .set_json(serde_json::json!({
      "firstName": "Augusta",
      "isVerified": true,
    }))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let json: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(json["data"]["firstName"], "Augusta");
  assert_eq!(json["data"]["isVerified"], false);

  // delete returns the removed record
  let req = test::TestRequest::delete()
    .uri(&format!("/users/{user_id}"))
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let json: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(json["data"]["id"], user_id);
}

#[actix_web::test]
async fn test_missing_ids_return_not_found() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  test::call_service(&app, req).await;

  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(login_body("ada@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let token = json["data"]["token"].as_str().unwrap().to_string();

  let missing = Uuid::new_v4();

  let req = test::TestRequest::get()
    .uri(&format!("/users/{missing}"))
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 404);

  let req = test::TestRequest::delete()
    .uri(&format!("/users/{missing}"))
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn test_deleting_account_invalidates_nothing_else() {
  let ctx = TestContext::new();
  let app = init_app!(ctx);

  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("ada@example.com"))
    .to_request();
  test::call_service(&app, req).await;
  let req = test::TestRequest::post()
    .uri("/users/register")
    .set_json(register_body("grace@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let other_id = json["data"]["id"].as_str().unwrap().to_string();

  let req = test::TestRequest::post()
    .uri("/users/login")
    .set_json(login_body("ada@example.com"))
    .to_request();
  let json: serde_json::Value = test::call_and_read_body_json(&app, req).await;
  let token = json["data"]["token"].as_str().unwrap().to_string();

  let req = test::TestRequest::delete()
    .uri(&format!("/users/{other_id}"))
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  assert_eq!(test::call_service(&app, req).await.status(), 200);

  // The remaining account still lists and authenticates
  let req = test::TestRequest::get()
    .uri("/users")
    .insert_header(("Authorization", format!("Bearer {token}")))
    .to_request();
  let resp = test::call_service(&app, req).await;
  assert_eq!(resp.status(), 200);
  let json: serde_json::Value = test::read_body_json(resp).await;
  assert_eq!(json["data"].as_array().unwrap().len(), 1);
  assert_eq!(json["data"][0]["email"], "ada@example.com");
}
