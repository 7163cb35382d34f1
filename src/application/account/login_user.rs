use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::{Email, Password};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LoginUserCommand {
  /// User's email address
  pub email: String,
  /// User's password (plain text)
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LoginUserResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,
  /// User's email address
  pub email: String,
  /// Bearer token for authentication
  pub session_token: String,
  /// Session expiration timestamp
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LoginUserUseCase {
  account_service: Arc<AccountService>,
}

impl LoginUserUseCase {
  /// Creates a new instance of LoginUserUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the login use case
  ///
  /// # Errors
  /// Returns `AccountError::InvalidCredentials` for unknown email and wrong
  /// password alike
  pub async fn execute(&self, command: LoginUserCommand) -> Result<LoginUserResponse, AccountError> {
    // Parse and validate email
    let email = Email::new(command.email)?;

    // Parse and validate password
    let password = Password::new(command.password)?;

    let (account, session, session_token) = self.account_service.login(email, password).await?;

    Ok(LoginUserResponse {
      user_id: account.id,
      email: account.email,
      session_token: session_token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
