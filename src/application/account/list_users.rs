use std::sync::Arc;

use crate::domain::account::entities::UserAccount;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;

/// Use case for listing all accounts. No pagination; the surface returns
/// the full set.
pub struct ListUsersUseCase {
  account_service: Arc<AccountService>,
}

impl ListUsersUseCase {
  /// Creates a new instance of ListUsersUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the list use case
  pub async fn execute(&self) -> Result<Vec<UserAccount>, AccountError> {
    self.account_service.list_users().await
  }
}
