use std::sync::Arc;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::SessionToken;

/// Trusted identity resolved from a bearer token
#[derive(Debug, Clone)]
pub struct AuthenticateResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,
  /// User's email address
  pub email: String,
}

/// Use case for resolving a bearer token to a trusted identity.
///
/// This is the single entry point the HTTP middleware uses; downstream
/// operations receive the resulting user id as an explicit argument and
/// never re-derive identity from the request.
pub struct AuthenticateUseCase {
  account_service: Arc<AccountService>,
}

impl AuthenticateUseCase {
  /// Creates a new instance of AuthenticateUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the authentication use case
  ///
  /// # Errors
  /// Returns `AccountError::InvalidSession` for malformed, unknown or
  /// expired tokens
  pub async fn execute(&self, bearer_token: String) -> Result<AuthenticateResponse, AccountError> {
    let token =
      SessionToken::from_string(bearer_token).map_err(|_| AccountError::InvalidSession)?;

    let account = self.account_service.authenticate(token).await?;

    Ok(AuthenticateResponse {
      user_id: account.id,
      email: account.email,
    })
  }
}
