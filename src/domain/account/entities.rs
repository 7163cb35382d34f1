use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// UserAccount entity representing one registered person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
  /// Unique identifier for the account
  pub id: Uuid,
  /// User's first name
  pub first_name: String,
  /// User's last name
  pub last_name: String,
  /// User's email address (unique)
  pub email: String,
  /// Hashed password using Argon2
  pub password_hash: String,
  /// Whether the account has been verified
  pub is_verified: bool,
  /// Outstanding verification code, if one has been issued
  pub verification_code: Option<String>,
  /// Expiration time for the outstanding verification code
  pub verification_code_expires_at: Option<DateTime<Utc>>,
  /// Timestamp when the account was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the account was last updated
  pub updated_at: DateTime<Utc>,
}

impl UserAccount {
  /// Creates a new unverified account with the given details
  pub fn new(
    first_name: String,
    last_name: String,
    email: String,
    password_hash: String,
  ) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      first_name,
      last_name,
      email,
      password_hash,
      is_verified: false,
      verification_code: None,
      verification_code_expires_at: None,
      created_at: now,
      updated_at: now,
    }
  }

  /// Stores a fresh verification code, replacing any prior one
  pub fn issue_verification_code(&mut self, code: String, expires_in: Duration) {
    self.verification_code = Some(code);
    self.verification_code_expires_at = Some(Utc::now() + expires_in);
    self.updated_at = Utc::now();
  }

  /// Checks whether the submitted code matches the outstanding one and is
  /// still within its lifetime. Absent code always fails.
  pub fn verification_code_matches(&self, submitted: &str) -> bool {
    use sha2::{Digest, Sha256};

    match (&self.verification_code, &self.verification_code_expires_at) {
      (Some(stored), Some(expires_at)) => {
        // Digests are compared instead of the raw strings so the cost does
        // not depend on where the values first differ
        let stored = Sha256::digest(stored.as_bytes());
        let submitted = Sha256::digest(submitted.as_bytes());
        stored == submitted && expires_at > &Utc::now()
      }
      _ => false,
    }
  }

  /// Marks the account as verified and consumes the verification code
  pub fn verify(&mut self) {
    self.is_verified = true;
    self.verification_code = None;
    self.verification_code_expires_at = None;
    self.updated_at = Utc::now();
  }

  /// Updates the account's email. The account drops back to unverified and
  /// any outstanding code is invalidated, since verification is bound to
  /// the address it was performed against.
  pub fn update_email(&mut self, new_email: String) {
    self.email = new_email;
    self.is_verified = false;
    self.verification_code = None;
    self.verification_code_expires_at = None;
    self.updated_at = Utc::now();
  }

  /// Updates the account's first name
  pub fn update_first_name(&mut self, new_first_name: String) {
    self.first_name = new_first_name;
    self.updated_at = Utc::now();
  }

  /// Updates the account's last name
  pub fn update_last_name(&mut self, new_last_name: String) {
    self.last_name = new_last_name;
    self.updated_at = Utc::now();
  }
}

/// Session entity backing one issued bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
  /// Unique identifier for the session
  pub id: Uuid,
  /// Reference to the account that owns this session
  pub user_id: Uuid,
  /// SHA-256 hash of the bearer token; the raw token is never persisted
  pub token_hash: String,
  /// Timestamp when the session expires
  pub expires_at: DateTime<Utc>,
  /// Timestamp when the session was created
  pub created_at: DateTime<Utc>,
}

impl Session {
  /// Creates a new session for an account
  pub fn new(user_id: Uuid, token_hash: String, expires_at: DateTime<Utc>) -> Self {
    Self {
      id: Uuid::new_v4(),
      user_id,
      token_hash,
      expires_at,
      created_at: Utc::now(),
    }
  }

  /// Creates a session with a duration instead of an absolute expiration
  pub fn with_duration(user_id: Uuid, token_hash: String, duration: Duration) -> Self {
    let expires_at = Utc::now() + duration;
    Self::new(user_id, token_hash, expires_at)
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}
