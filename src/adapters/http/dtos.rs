use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::account::entities::UserAccount;

/// Request for user registration
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
  /// User's first name
  #[validate(length(
    min = 1,
    max = 255,
    message = "First name must be between 1 and 255 characters"
  ))]
  pub first_name: String,

  /// User's last name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Last name must be between 1 and 255 characters"
  ))]
  pub last_name: String,

  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(
    min = 8,
    max = 128,
    message = "Password must be between 8 and 128 characters"
  ))]
  pub password: String,
}

/// Request for user login
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
  /// User's email address
  #[validate(email(message = "Invalid email format"))]
  pub email: String,

  /// User's password
  #[validate(length(min = 1, message = "Password is required"))]
  pub password: String,
}

/// Request for consuming a verification code
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct VerifyUserRequest {
  /// The submitted verification code
  #[validate(length(min = 1, message = "Code is required"))]
  pub code: String,
}

/// Request for partially updating an account. Verification state is not
/// part of this surface and cannot be patched.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
  /// New first name
  #[validate(length(
    min = 1,
    max = 255,
    message = "First name must be between 1 and 255 characters"
  ))]
  pub first_name: Option<String>,

  /// New last name
  #[validate(length(
    min = 1,
    max = 255,
    message = "Last name must be between 1 and 255 characters"
  ))]
  pub last_name: Option<String>,

  /// New email address
  #[validate(email(message = "Invalid email format"))]
  pub email: Option<String>,
}

/// Outward representation of an account. The password hash and any
/// outstanding verification code never leave the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
  /// Unique identifier of the user
  pub id: Uuid,

  /// User's first name
  pub first_name: String,

  /// User's last name
  pub last_name: String,

  /// User's email address
  pub email: String,

  /// Whether the account has been verified
  pub is_verified: bool,

  /// Timestamp when the account was created
  pub created_at: DateTime<Utc>,

  /// Timestamp when the account was last updated
  pub updated_at: DateTime<Utc>,
}

impl From<UserAccount> for UserResponse {
  fn from(account: UserAccount) -> Self {
    Self {
      id: account.id,
      first_name: account.first_name,
      last_name: account.last_name,
      email: account.email,
      is_verified: account.is_verified,
      created_at: account.created_at,
      updated_at: account.updated_at,
    }
  }
}

/// Envelope for a single account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserEnvelope {
  /// Human-readable outcome message
  pub message: String,

  /// The account record
  pub data: UserResponse,
}

/// Envelope for an account listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListEnvelope {
  /// The account records
  pub data: Vec<UserResponse>,
}

/// Token payload returned by a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
  /// Bearer token for subsequent requests
  pub token: String,

  /// Token expiration timestamp
  pub expires_at: DateTime<Utc>,
}

/// Envelope for a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginEnvelope {
  /// Human-readable outcome message
  pub message: String,

  /// The issued token
  pub data: LoginData,
}

/// Standard response for operations that carry no data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
  /// Human-readable outcome message
  pub message: String,
}

/// Standard error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
  /// Error type/code
  pub error: String,

  /// Human-readable error message
  pub message: String,
}
