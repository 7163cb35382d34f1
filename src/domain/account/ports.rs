use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::entities::{Session, UserAccount};
use super::errors::AccountError;
use super::value_objects::{Email, Password, PasswordHash, VerificationCode};

/// Repository trait for account persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Inserts a new account into the repository
  async fn insert(&self, account: UserAccount) -> Result<UserAccount, AccountError>;

  /// Finds an account by its unique identifier
  async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, AccountError>;

  /// Finds an account by its email address
  async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, AccountError>;

  /// Returns all accounts
  async fn find_all(&self) -> Result<Vec<UserAccount>, AccountError>;

  /// Updates an existing account
  async fn update(&self, account: UserAccount) -> Result<UserAccount, AccountError>;

  /// Removes an account, returning the deleted record if one existed
  async fn delete(&self, id: Uuid) -> Result<Option<UserAccount>, AccountError>;

  /// Atomically stores a verification code on an unverified account,
  /// replacing any prior code. Returns false when the account is missing
  /// or already verified.
  async fn store_verification_code(
    &self,
    id: Uuid,
    code: &VerificationCode,
    expires_at: DateTime<Utc>,
  ) -> Result<bool, AccountError>;

  /// Atomically consumes the outstanding verification code: the account is
  /// marked verified and the code cleared only if the submitted value
  /// matches the stored one and it has not expired. The match and the
  /// state flip are one operation so two racing consumers cannot both
  /// succeed. Returns the updated account on a match, None otherwise.
  async fn consume_verification_code(
    &self,
    id: Uuid,
    submitted: &str,
  ) -> Result<Option<UserAccount>, AccountError>;
}

/// Repository trait for session persistence operations
#[async_trait]
pub trait SessionRepository: Send + Sync {
  /// Creates a new session in the repository
  async fn create(&self, session: Session) -> Result<Session, AccountError>;

  /// Finds a session by its token hash
  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AccountError>;

  /// Deletes a specific session
  async fn delete(&self, session_id: Uuid) -> Result<(), AccountError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AccountError>;

  /// Verifies a plain text password against a hashed password
  async fn verify(
    &self,
    password: &Password,
    hashed_password: &PasswordHash,
  ) -> Result<bool, AccountError>;
}

/// Service trait for verification-code generation
#[async_trait]
pub trait CodeGenerator: Send + Sync {
  /// Generates a cryptographically random fixed-length code
  async fn generate(&self) -> Result<VerificationCode, AccountError>;
}
