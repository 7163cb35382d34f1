use chrono::{Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

use super::entities::{Session, UserAccount};
use super::errors::{AccountError, RepositoryError};
use super::ports::{CodeGenerator, PasswordHasher, SessionRepository, UserRepository};
use super::value_objects::{Email, Password, SessionToken, VerificationCode};

/// Runtime configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
  /// Lifetime of a bearer session in seconds
  pub session_ttl_seconds: i64,
  /// Lifetime of an issued verification code in seconds
  pub verification_code_ttl_seconds: i64,
}

/// Account service implementing the user lifecycle and the
/// authentication/verification workflow
pub struct AccountService {
  user_repo: Arc<dyn UserRepository>,
  session_repo: Arc<dyn SessionRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
  code_generator: Arc<dyn CodeGenerator>,
  config: AccountServiceConfig,
}

/// Partial update of the mutable profile fields. Verification state is not
/// expressible here; it only changes through the verify workflow.
#[derive(Debug, Clone, Default)]
pub struct AccountPatch {
  pub first_name: Option<String>,
  pub last_name: Option<String>,
  pub email: Option<String>,
}

impl AccountService {
  /// Creates a new instance of AccountService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_repo: Arc<dyn SessionRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    code_generator: Arc<dyn CodeGenerator>,
    config: AccountServiceConfig,
  ) -> Self {
    Self {
      user_repo,
      session_repo,
      password_hasher,
      code_generator,
      config,
    }
  }

  /// Registers a new account
  ///
  /// # Errors
  /// Returns `AccountError::EmailAlreadyExists` if the email is already
  /// registered
  pub async fn register(
    &self,
    first_name: String,
    last_name: String,
    email: Email,
    password: Password,
  ) -> Result<UserAccount, AccountError> {
    // Check if email already exists
    if let Some(_existing) = self.user_repo.find_by_email(&email).await? {
      return Err(AccountError::EmailAlreadyExists);
    }

    // Hash the password
    let password_hash = self.password_hasher.hash(&password).await?;

    // Create the account; it starts unverified
    let account = UserAccount::new(
      first_name,
      last_name,
      email.into_inner(),
      password_hash.into_inner(),
    );

    // Save to the repository. The pre-check above races against concurrent
    // registrations, so the unique index remains the authority.
    match self.user_repo.insert(account).await {
      Ok(account) => Ok(account),
      Err(AccountError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AccountError::EmailAlreadyExists)
      }
      Err(e) => Err(e),
    }
  }

  /// Authenticates credentials and creates a new session
  ///
  /// Unknown email and wrong password both return
  /// `AccountError::InvalidCredentials`; both paths cost one Argon2
  /// operation so they are not distinguishable by timing.
  pub async fn login(
    &self,
    email: Email,
    password: Password,
  ) -> Result<(UserAccount, Session, SessionToken), AccountError> {
    let account = match self.user_repo.find_by_email(&email).await? {
      Some(account) => account,
      None => {
        let _ = self.password_hasher.hash(&password).await;
        return Err(AccountError::InvalidCredentials);
      }
    };

    let password_hash =
      super::value_objects::PasswordHash::from_hash(&account.password_hash)?;

    let is_valid = self.password_hasher.verify(&password, &password_hash).await?;
    if !is_valid {
      return Err(AccountError::InvalidCredentials);
    }

    // Issue an opaque bearer token; only its hash is persisted
    let session_token = SessionToken::generate();
    let token_hash = session_token.hash();

    let session = Session::with_duration(
      account.id,
      token_hash.into_inner(),
      Duration::seconds(self.config.session_ttl_seconds),
    );

    let created_session = self.session_repo.create(session).await?;

    Ok((account, created_session, session_token))
  }

  /// Resolves a bearer token to the account that owns it
  ///
  /// Expired sessions are deleted on sight. This is the only place a token
  /// is turned into an identity; every other operation takes the resulting
  /// id as a trusted argument.
  pub async fn authenticate(&self, token: SessionToken) -> Result<UserAccount, AccountError> {
    let token_hash = token.hash();

    let session = self
      .session_repo
      .find_by_token_hash(token_hash.as_str())
      .await?
      .ok_or(AccountError::InvalidSession)?;

    if session.is_expired() {
      self.session_repo.delete(session.id).await?;
      return Err(AccountError::InvalidSession);
    }

    self
      .user_repo
      .find_by_id(session.user_id)
      .await?
      .ok_or(AccountError::InvalidSession)
  }

  /// Issues a fresh verification code for an unverified account, replacing
  /// any prior code
  ///
  /// The returned code is meant for an out-of-band transport (email/SMS);
  /// it must not be echoed back to the requesting client.
  pub async fn request_verification_code(
    &self,
    user_id: Uuid,
  ) -> Result<VerificationCode, AccountError> {
    let account = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AccountError::UserNotFound)?;

    if account.is_verified {
      return Err(AccountError::AlreadyVerified);
    }

    let code = self.code_generator.generate().await?;
    let expires_at = Utc::now() + Duration::seconds(self.config.verification_code_ttl_seconds);

    let stored = self
      .user_repo
      .store_verification_code(user_id, &code, expires_at)
      .await?;

    if !stored {
      // The guarded update refused: the account was deleted or verified
      // between the read above and now.
      return match self.user_repo.find_by_id(user_id).await? {
        Some(_) => Err(AccountError::AlreadyVerified),
        None => Err(AccountError::UserNotFound),
      };
    }

    Ok(code)
  }

  /// Consumes a verification code, flipping the account to verified
  ///
  /// Fails with `VerificationCodeNotIssued` when no code is outstanding and
  /// `VerificationCodeMismatch` on a wrong or expired code. The match and
  /// the flip happen in one repository operation, so a replay of a consumed
  /// code or a race against a re-issue cannot verify twice.
  pub async fn verify(
    &self,
    user_id: Uuid,
    submitted_code: &str,
  ) -> Result<UserAccount, AccountError> {
    let account = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AccountError::UserNotFound)?;

    if account.verification_code.is_none() {
      return Err(AccountError::VerificationCodeNotIssued);
    }

    self
      .user_repo
      .consume_verification_code(user_id, submitted_code)
      .await?
      .ok_or(AccountError::VerificationCodeMismatch)
  }

  /// Returns all accounts. The surface has no pagination; callers inherit
  /// the full result set.
  pub async fn list_users(&self) -> Result<Vec<UserAccount>, AccountError> {
    self.user_repo.find_all().await
  }

  /// Returns one account by id
  pub async fn get_user(&self, user_id: Uuid) -> Result<UserAccount, AccountError> {
    self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AccountError::UserNotFound)
  }

  /// Applies a partial profile update
  ///
  /// Changing the email re-validates the address, drops the account back to
  /// unverified and invalidates any outstanding code.
  pub async fn update_user(
    &self,
    user_id: Uuid,
    patch: AccountPatch,
  ) -> Result<UserAccount, AccountError> {
    let mut account = self
      .user_repo
      .find_by_id(user_id)
      .await?
      .ok_or(AccountError::UserNotFound)?;

    if let Some(first_name) = patch.first_name {
      account.update_first_name(first_name);
    }

    if let Some(last_name) = patch.last_name {
      account.update_last_name(last_name);
    }

    if let Some(email) = patch.email {
      let email = Email::new(email)?;
      if email.as_str() != account.email {
        account.update_email(email.into_inner());
      }
    }

    match self.user_repo.update(account).await {
      Ok(account) => Ok(account),
      Err(AccountError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AccountError::EmailAlreadyExists)
      }
      Err(AccountError::Repository(RepositoryError::NotFound)) => Err(AccountError::UserNotFound),
      Err(e) => Err(e),
    }
  }

  /// Removes an account, returning the deleted record
  pub async fn delete_user(&self, user_id: Uuid) -> Result<UserAccount, AccountError> {
    self
      .user_repo
      .delete(user_id)
      .await?
      .ok_or(AccountError::UserNotFound)
  }
}
