use actix_web::{HttpResponse, web};
use std::sync::Arc;
use validator::Validate;

use crate::adapters::http::{
  dtos::{LoginData, LoginEnvelope, LoginRequest, RegisterRequest, UserEnvelope, UserResponse},
  errors::ApiError,
};
use crate::application::account::{
  LoginUserCommand, LoginUserUseCase, RegisterUserCommand, RegisterUserUseCase,
};

/// Handler for user registration
///
/// POST /users/register
/// Body: RegisterRequest (JSON)
/// Response: UserEnvelope (JSON) with status 201
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  // Create command from request
  let command = RegisterUserCommand {
    first_name: request.first_name.clone(),
    last_name: request.last_name.clone(),
    email: request.email.clone(),
    password: request.password.clone(),
  };

  // Execute use case
  let account = use_case.execute(command).await?;

  // Map to API response; the password hash never leaves the service
  let response = UserEnvelope {
    message: "User created".to_string(),
    data: UserResponse::from(account),
  };

  Ok(HttpResponse::Created().json(response))
}

/// Handler for user login
///
/// POST /users/login
/// Body: LoginRequest (JSON)
/// Response: LoginEnvelope (JSON) with status 200; failures are 404 with
/// one shape for unknown email and wrong password
pub async fn login_handler(
  request: web::Json<LoginRequest>,
  use_case: web::Data<Arc<LoginUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  // Create command from request
  let command = LoginUserCommand {
    email: request.email.clone(),
    password: request.password.clone(),
  };

  // Execute use case
  let response = use_case.execute(command).await?;

  let response = LoginEnvelope {
    message: "Login successful".to_string(),
    data: LoginData {
      token: response.session_token,
      expires_at: response.expires_at,
    },
  };

  Ok(HttpResponse::Ok().json(response))
}
