use std::sync::Arc;
use uuid::Uuid;

use crate::domain::account::entities::UserAccount;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;

/// Use case for removing an account
pub struct DeleteUserUseCase {
  account_service: Arc<AccountService>,
}

impl DeleteUserUseCase {
  /// Creates a new instance of DeleteUserUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the delete use case, returning the removed record
  ///
  /// # Errors
  /// Returns `AccountError::UserNotFound` when nothing existed under the id
  pub async fn execute(&self, user_id: Uuid) -> Result<UserAccount, AccountError> {
    self.account_service.delete_user(user_id).await
  }
}
