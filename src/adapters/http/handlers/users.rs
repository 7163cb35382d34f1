use actix_web::{HttpRequest, HttpResponse, web};
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::adapters::http::{
  dtos::{
    MessageResponse, UpdateUserRequest, UserEnvelope, UserListEnvelope, UserResponse,
    VerifyUserRequest,
  },
  errors::ApiError,
  middleware::AuthUserExt,
};
use crate::application::account::{
  DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, RequestVerificationCodeUseCase,
  UpdateUserCommand, UpdateUserUseCase, VerifyUserCommand, VerifyUserUseCase,
};

/// Handler for issuing a verification code
///
/// POST /users/request-verification-code
/// Headers: Authorization: Bearer <token>
/// Response: MessageResponse (JSON) with status 200
///
/// The target identity comes from the verified token, never from the body.
/// The code itself travels over an out-of-band channel and is not echoed.
pub async fn request_verification_code_handler(
  use_case: web::Data<Arc<RequestVerificationCodeUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  let user = http_req.authenticated_user()?;

  let _code = use_case.execute(user.user_id).await?;

  let response = MessageResponse {
    message: "Verification code issued".to_string(),
  };

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for consuming a verification code
///
/// PUT /users/verify-user
/// Headers: Authorization: Bearer <token>
/// Body: VerifyUserRequest (JSON)
/// Response: UserEnvelope (JSON) with status 200; failures are 500 for
/// client compatibility
pub async fn verify_user_handler(
  request: web::Json<VerifyUserRequest>,
  use_case: web::Data<Arc<VerifyUserUseCase>>,
  http_req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  let user = http_req.authenticated_user()?;

  let command = VerifyUserCommand {
    user_id: user.user_id,
    code: request.code.clone(),
  };

  let account = use_case.execute(command).await?;

  let response = UserEnvelope {
    message: "Account verified".to_string(),
    data: UserResponse::from(account),
  };

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for listing all users
///
/// GET /users
/// Headers: Authorization: Bearer <token>
/// Response: UserListEnvelope (JSON) with status 200
pub async fn list_users_handler(
  use_case: web::Data<Arc<ListUsersUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let accounts = use_case.execute().await?;

  let response = UserListEnvelope {
    data: accounts.into_iter().map(UserResponse::from).collect(),
  };

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for fetching one user by id
///
/// GET /users/{id}
/// Headers: Authorization: Bearer <token>
/// Response: UserEnvelope (JSON) with status 200, 404 when absent
pub async fn get_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<GetUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let account = use_case.execute(path.into_inner()).await?;

  let response = UserEnvelope {
    message: "User found".to_string(),
    data: UserResponse::from(account),
  };

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for partially updating a user
///
/// PUT /users/{id}
/// Headers: Authorization: Bearer <token>
/// Body: UpdateUserRequest (JSON)
/// Response: UserEnvelope (JSON) with status 200, 404 when absent
pub async fn update_user_handler(
  path: web::Path<Uuid>,
  request: web::Json<UpdateUserRequest>,
  use_case: web::Data<Arc<UpdateUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  // Validate request
  request.validate()?;

  let command = UpdateUserCommand {
    first_name: request.first_name.clone(),
    last_name: request.last_name.clone(),
    email: request.email.clone(),
  };

  let account = use_case.execute(path.into_inner(), command).await?;

  let response = UserEnvelope {
    message: "User updated".to_string(),
    data: UserResponse::from(account),
  };

  Ok(HttpResponse::Ok().json(response))
}

/// Handler for deleting a user
///
/// DELETE /users/{id}
/// Headers: Authorization: Bearer <token>
/// Response: UserEnvelope (JSON) with status 200 carrying the removed
/// record, 404 when nothing existed
pub async fn delete_user_handler(
  path: web::Path<Uuid>,
  use_case: web::Data<Arc<DeleteUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let account = use_case.execute(path.into_inner()).await?;

  let response = UserEnvelope {
    message: "User deleted".to_string(),
    data: UserResponse::from(account),
  };

  Ok(HttpResponse::Ok().json(response))
}
