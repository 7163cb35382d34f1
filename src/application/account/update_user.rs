use std::sync::Arc;
use uuid::Uuid;

use crate::domain::account::entities::UserAccount;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::{AccountPatch, AccountService};

/// Command for partially updating an account's profile.
///
/// Only profile fields are present; verification state cannot be set
/// through this path.
#[derive(Debug, Clone, Default)]
pub struct UpdateUserCommand {
  /// New first name, if changing
  pub first_name: Option<String>,
  /// New last name, if changing
  pub last_name: Option<String>,
  /// New email address, if changing; resets verification
  pub email: Option<String>,
}

/// Use case for updating an account
pub struct UpdateUserUseCase {
  account_service: Arc<AccountService>,
}

impl UpdateUserUseCase {
  /// Creates a new instance of UpdateUserUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the update use case
  ///
  /// # Errors
  /// Returns `AccountError::UserNotFound` for an unknown id and
  /// `AccountError::EmailAlreadyExists` when the new email is taken
  pub async fn execute(
    &self,
    user_id: Uuid,
    command: UpdateUserCommand,
  ) -> Result<UserAccount, AccountError> {
    let patch = AccountPatch {
      first_name: command.first_name,
      last_name: command.last_name,
      email: command.email,
    };

    self.account_service.update_user(user_id, patch).await
  }
}
