use actix_web::{
  HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use serde::Serialize;
use std::fmt;

use crate::domain::account::errors::{AccountError, RepositoryError};

use super::dtos::ErrorResponse;

/// API error type that maps domain errors to HTTP responses.
///
/// The status assignments are a compatibility contract: rejected creation
/// is 400, an unknown record and a failed login are both 404, and
/// verification-code request/verify failures are 500. Existing clients
/// depend on these exact codes.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "details")]
pub enum ApiError {
  /// Malformed input (400 Bad Request)
  Validation(String),

  /// Account creation rejected (400 Bad Request)
  CreationRejected(String),

  /// Missing record or failed login (404 Not Found)
  NotFound(String),

  /// Missing, malformed or expired bearer token (401 Unauthorized)
  Unauthorized,

  /// Verification-code request or verify failure (500, compatibility contract)
  Verification(String),

  /// Internal server error (500 Internal Server Error)
  Internal(String),
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ApiError::Validation(msg) => write!(f, "Validation error: {}", msg),
      ApiError::CreationRejected(msg) => write!(f, "Creation rejected: {}", msg),
      ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
      ApiError::Unauthorized => write!(f, "Unauthorized"),
      ApiError::Verification(msg) => write!(f, "Verification failure: {}", msg),
      ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::CreationRejected(_) => StatusCode::BAD_REQUEST,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Verification(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    let status = self.status_code();
    let (error_type, message) = match self {
      ApiError::Validation(msg) => ("validation_error", msg.clone()),
      ApiError::CreationRejected(msg) => ("creation_rejected", msg.clone()),
      ApiError::NotFound(msg) => ("not_found", msg.clone()),
      ApiError::Unauthorized => (
        "unauthorized",
        "Missing or invalid authorization token".to_string(),
      ),
      ApiError::Verification(msg) => ("verification_failed", msg.clone()),
      ApiError::Internal(msg) => {
        // Internal detail is logged, never returned
        tracing::error!("Internal error: {}", msg);
        (
          "internal_error",
          "An internal server error occurred".to_string(),
        )
      }
    };

    let error_response = ErrorResponse {
      error: error_type.to_string(),
      message,
    };

    HttpResponse::build(status)
      .content_type(ContentType::json())
      .json(error_response)
  }
}

/// Convert AccountError to ApiError
impl From<AccountError> for ApiError {
  fn from(error: AccountError) -> Self {
    match error {
      AccountError::EmailAlreadyExists => {
        ApiError::CreationRejected("An account with this email already exists".to_string())
      }
      AccountError::InvalidCredentials => {
        ApiError::NotFound("Invalid email or password".to_string())
      }
      AccountError::UserNotFound => ApiError::NotFound("User not found".to_string()),
      AccountError::InvalidSession => ApiError::Unauthorized,
      AccountError::AlreadyVerified => {
        ApiError::Verification("Account is already verified".to_string())
      }
      AccountError::VerificationCodeNotIssued => {
        ApiError::Verification("No verification code has been issued".to_string())
      }
      AccountError::VerificationCodeMismatch => {
        ApiError::Verification("Verification code is invalid or has expired".to_string())
      }
      AccountError::ValueObject(err) => ApiError::Validation(err.to_string()),
      AccountError::Repository(err) => match err {
        RepositoryError::NotFound => ApiError::NotFound("User not found".to_string()),
        RepositoryError::DuplicateKey(_) => {
          ApiError::CreationRejected("An account with this email already exists".to_string())
        }
        _ => ApiError::Internal(err.to_string()),
      },
      AccountError::Hash(err) => ApiError::Internal(err.to_string()),
    }
  }
}

/// Convert validation errors from validator crate
impl From<validator::ValidationErrors> for ApiError {
  fn from(errors: validator::ValidationErrors) -> Self {
    let messages: Vec<String> = errors
      .field_errors()
      .iter()
      .flat_map(|(field, errors)| {
        errors
          .iter()
          .map(|error| {
            error
              .message
              .as_ref()
              .map(|m| m.to_string())
              .unwrap_or_else(|| format!("Invalid field: {}", field))
          })
          .collect::<Vec<_>>()
      })
      .collect();

    ApiError::Validation(messages.join(", "))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_api_error_status_codes() {
    assert_eq!(
      ApiError::Validation("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::CreationRejected("test".to_string()).status_code(),
      StatusCode::BAD_REQUEST
    );
    assert_eq!(
      ApiError::NotFound("test".to_string()).status_code(),
      StatusCode::NOT_FOUND
    );
    assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
      ApiError::Verification("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
      ApiError::Internal("test".to_string()).status_code(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
  }

  #[test]
  fn test_duplicate_email_maps_to_creation_rejected() {
    let api_error: ApiError = AccountError::EmailAlreadyExists.into();
    assert_eq!(api_error.status_code(), StatusCode::BAD_REQUEST);
  }

  #[test]
  fn test_login_failure_maps_to_not_found() {
    let api_error: ApiError = AccountError::InvalidCredentials.into();
    assert_eq!(api_error.status_code(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn test_verification_failures_map_to_internal_class() {
    let mismatch: ApiError = AccountError::VerificationCodeMismatch.into();
    let not_issued: ApiError = AccountError::VerificationCodeNotIssued.into();

    assert_eq!(mismatch.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(not_issued.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[test]
  fn test_store_fault_hides_detail() {
    let api_error: ApiError =
      AccountError::Repository(RepositoryError::DatabaseError("connection reset".to_string()))
        .into();

    let response = api_error.error_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
