use std::sync::Arc;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::services::AccountService;
use crate::domain::account::value_objects::VerificationCode;

/// Use case for issuing a fresh verification code to an account.
///
/// Takes the trusted user id resolved by the authentication gate, never an
/// identity from the request body. The returned code is handed to an
/// out-of-band transport; the HTTP layer reports only success.
pub struct RequestVerificationCodeUseCase {
  account_service: Arc<AccountService>,
}

impl RequestVerificationCodeUseCase {
  /// Creates a new instance of RequestVerificationCodeUseCase
  pub fn new(account_service: Arc<AccountService>) -> Self {
    Self { account_service }
  }

  /// Executes the use case, replacing any previously issued code
  ///
  /// # Errors
  /// Returns `AccountError::UserNotFound` for an unknown id and
  /// `AccountError::AlreadyVerified` for an account past verification
  pub async fn execute(&self, user_id: Uuid) -> Result<VerificationCode, AccountError> {
    self.account_service.request_verification_code(user_id).await
  }
}
