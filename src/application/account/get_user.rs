use std::sync::Arc;
use uuid::Uuid;

use crate::domain::account::entities::UserAccount;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;

/// Use case for fetching a single account by id
pub struct GetUserUseCase {
  account_service: Arc<AccountService>,
}

impl GetUserUseCase {
  /// Creates a new instance of GetUserUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the get use case
  ///
  /// # Errors
  /// Returns `AccountError::UserNotFound` when the id has no record
  pub async fn execute(&self, user_id: Uuid) -> Result<UserAccount, AccountError> {
    self.account_service.get_user(user_id).await
  }
}
