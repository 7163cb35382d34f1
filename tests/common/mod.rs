#![allow(dead_code)]

//! Test infrastructure for the userbase API tests

use std::sync::Arc;

use userbase::adapters::http::UserRouteDependencies;
use userbase::application::account::{
  AuthenticateUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, LoginUserUseCase,
  RegisterUserUseCase, RequestVerificationCodeUseCase, UpdateUserUseCase, VerifyUserUseCase,
};
use userbase::domain::account::services::{AccountService, AccountServiceConfig};
use userbase::infrastructure::persistence::memory::{
  InMemorySessionRepository, InMemoryUserRepository,
};
use userbase::infrastructure::security::{Argon2PasswordHasher, SecureCodeGenerator};

/// Everything a test needs: the route dependencies for building an app and
/// a handle on the backing store for observing state the API hides (e.g.
/// issued verification codes).
pub struct TestContext {
  pub deps: UserRouteDependencies,
  pub user_repo: Arc<InMemoryUserRepository>,
}

impl TestContext {
  pub fn new() -> Self {
    let user_repo = Arc::new(InMemoryUserRepository::new());
    let session_repo = Arc::new(InMemorySessionRepository::new());

    let account_service = Arc::new(AccountService::new(
      user_repo.clone(),
      session_repo,
      Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher")),
      Arc::new(SecureCodeGenerator::new()),
      AccountServiceConfig {
        session_ttl_seconds: 3600,
        verification_code_ttl_seconds: 900,
      },
    ));

    let deps = UserRouteDependencies {
      register_use_case: Arc::new(RegisterUserUseCase::new(account_service.clone())),
      login_use_case: Arc::new(LoginUserUseCase::new(account_service.clone())),
      authenticate_use_case: Arc::new(AuthenticateUseCase::new(account_service.clone())),
      request_verification_code_use_case: Arc::new(RequestVerificationCodeUseCase::new(
        account_service.clone(),
      )),
      verify_user_use_case: Arc::new(VerifyUserUseCase::new(account_service.clone())),
      list_users_use_case: Arc::new(ListUsersUseCase::new(account_service.clone())),
      get_user_use_case: Arc::new(GetUserUseCase::new(account_service.clone())),
      update_user_use_case: Arc::new(UpdateUserUseCase::new(account_service.clone())),
      delete_user_use_case: Arc::new(DeleteUserUseCase::new(account_service)),
    };

    Self { deps, user_repo }
  }
}

/// Standard registration body used across the tests
pub fn register_body(email: &str) -> serde_json::Value {
  serde_json::json!({
    "firstName": "Ada",
    "lastName": "Lovelace",
    "email": email,
    "password": "correct horse battery",
  })
}

/// Matching login body for `register_body`
pub fn login_body(email: &str) -> serde_json::Value {
  serde_json::json!({
    "email": email,
    "password": "correct horse battery",
  })
}
