use std::sync::Arc;
use uuid::Uuid;

use crate::domain::account::entities::UserAccount;
use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;

/// Command for verifying an account with a submitted code
#[derive(Debug, Clone)]
pub struct VerifyUserCommand {
  /// Trusted user id from the authentication gate
  pub user_id: Uuid,
  /// The submitted verification code
  pub code: String,
}

/// Use case for consuming a verification code
pub struct VerifyUserUseCase {
  account_service: Arc<AccountService>,
}

impl VerifyUserUseCase {
  /// Creates a new instance of VerifyUserUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the verify use case
  ///
  /// # Errors
  /// Returns `AccountError::VerificationCodeNotIssued` when no code is
  /// outstanding and `AccountError::VerificationCodeMismatch` on a wrong or
  /// expired code
  pub async fn execute(&self, command: VerifyUserCommand) -> Result<UserAccount, AccountError> {
    self
      .account_service
      .verify(command.user_id, &command.code)
      .await
  }
}
