use std::sync::Arc;

use crate::domain::account::entities::UserAccount;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::{Email, Password};

/// Command for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterUserCommand {
  /// User's first name
  pub first_name: String,
  /// User's last name
  pub last_name: String,
  /// User's email address
  pub email: String,
  /// User's password (plain text, will be hashed)
  pub password: String,
}

/// Use case for registering a new account
pub struct RegisterUserUseCase {
  account_service: Arc<AccountService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the registration use case
  ///
  /// # Errors
  /// Returns `AccountError` if registration fails (e.g., email already
  /// exists, validation errors)
  pub async fn execute(&self, command: RegisterUserCommand) -> Result<UserAccount, AccountError> {
    // Parse and validate email
    let email = Email::new(command.email)?;

    // Parse and validate password
    let password = Password::new(command.password)?;

    self
      .account_service
      .register(command.first_name, command.last_name, email, password)
      .await
  }
}
