use actix_web::web;
use std::sync::Arc;

use crate::application::account::{
  AuthenticateUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, LoginUserUseCase,
  RegisterUserUseCase, RequestVerificationCodeUseCase, UpdateUserUseCase, VerifyUserUseCase,
};

use super::handlers::auth::{login_handler, register_handler};
use super::handlers::users::{
  delete_user_handler, get_user_handler, list_users_handler, request_verification_code_handler,
  update_user_handler, verify_user_handler,
};
use super::middleware::AuthMiddleware;

/// Use cases required by the user routes
pub struct UserRouteDependencies {
  pub register_use_case: Arc<RegisterUserUseCase>,
  pub login_use_case: Arc<LoginUserUseCase>,
  pub authenticate_use_case: Arc<AuthenticateUseCase>,
  pub request_verification_code_use_case: Arc<RequestVerificationCodeUseCase>,
  pub verify_user_use_case: Arc<VerifyUserUseCase>,
  pub list_users_use_case: Arc<ListUsersUseCase>,
  pub get_user_use_case: Arc<GetUserUseCase>,
  pub update_user_use_case: Arc<UpdateUserUseCase>,
  pub delete_user_use_case: Arc<DeleteUserUseCase>,
}

/// Configure the user routes
///
/// Mounts the endpoint set under the provided scope (e.g. /users).
///
/// # Routes
///
/// - POST /register - Create a new account (no auth)
/// - POST /login - Authenticate and obtain a bearer token (no auth)
/// - POST /request-verification-code - Issue a verification code (bearer)
/// - PUT /verify-user - Consume a verification code (bearer)
/// - GET / - List all accounts (bearer)
/// - GET /{id} - Fetch one account (bearer)
/// - PUT /{id} - Partially update an account (bearer)
/// - DELETE /{id} - Remove an account (bearer)
///
/// The fixed-path routes are registered before the `{id}` routes so
/// `verify-user` is never captured as an id.
pub fn configure_user_routes(cfg: &mut web::ServiceConfig, deps: UserRouteDependencies) {
  cfg
    .app_data(web::Data::new(deps.register_use_case))
    .app_data(web::Data::new(deps.login_use_case))
    .app_data(web::Data::new(deps.request_verification_code_use_case))
    .app_data(web::Data::new(deps.verify_user_use_case))
    .app_data(web::Data::new(deps.list_users_use_case))
    .app_data(web::Data::new(deps.get_user_use_case))
    .app_data(web::Data::new(deps.update_user_use_case))
    .app_data(web::Data::new(deps.delete_user_use_case))
    .route("/register", web::post().to(register_handler))
    .route("/login", web::post().to(login_handler))
    .service(
      web::scope("")
        .wrap(AuthMiddleware::new(deps.authenticate_use_case))
        .route(
          "/request-verification-code",
          web::post().to(request_verification_code_handler),
        )
        .route("/verify-user", web::put().to(verify_user_handler))
        .route("", web::get().to(list_users_handler))
        .route("/{id}", web::get().to(get_user_handler))
        .route("/{id}", web::put().to(update_user_handler))
        .route("/{id}", web::delete().to(delete_user_handler)),
    );
}
