use actix_web::{
  Error, HttpMessage,
  body::EitherBody,
  dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
  error::ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
  future::{Ready, ready},
  rc::Rc,
  sync::Arc,
};
use uuid::Uuid;

use crate::{adapters::http::errors::ApiError, application::account::AuthenticateUseCase};

/// Trusted identity attached to a request by the authentication gate.
///
/// Handlers behind `AuthMiddleware` read this from request extensions and
/// pass the id on as an explicit argument; identity never comes from the
/// request body.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
  /// Unique identifier of the authenticated user
  pub user_id: Uuid,
  /// Email address of the authenticated user
  pub email: String,
}

/// Authentication middleware validating bearer tokens.
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Resolves it to an account via AuthenticateUseCase
/// 3. Attaches an `AuthenticatedUser` to request extensions
/// 4. Returns 401 Unauthorized if the token is missing, invalid or expired
pub struct AuthMiddleware {
  authenticate_use_case: Arc<AuthenticateUseCase>,
}

impl AuthMiddleware {
  /// Creates a new authentication middleware
  pub fn new(authenticate_use_case: Arc<AuthenticateUseCase>) -> Self {
    Self {
      authenticate_use_case,
    }
  }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Transform = AuthMiddlewareService<S>;
  type InitError = ();
  type Future = Ready<Result<Self::Transform, Self::InitError>>;

  fn new_transform(&self, service: S) -> Self::Future {
    ready(Ok(AuthMiddlewareService {
      service: Rc::new(service),
      authenticate_use_case: self.authenticate_use_case.clone(),
    }))
  }
}

pub struct AuthMiddlewareService<S> {
  service: Rc<S>,
  authenticate_use_case: Arc<AuthenticateUseCase>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
  S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
  S::Future: 'static,
  B: 'static,
{
  type Response = ServiceResponse<EitherBody<B>>;
  type Error = Error;
  type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

  forward_ready!(service);

  fn call(&self, req: ServiceRequest) -> Self::Future {
    let service = Rc::clone(&self.service);
    let authenticate_use_case = self.authenticate_use_case.clone();

    Box::pin(async move {
      // Extract bearer token from Authorization header
      let bearer_token = match extract_bearer_token(&req) {
        Ok(token) => token,
        Err(e) => {
          let (request, _) = req.into_parts();
          let response = e.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      // Resolve token to a trusted identity
      let identity = match authenticate_use_case.execute(bearer_token).await {
        Ok(identity) => identity,
        Err(e) => {
          let (request, _) = req.into_parts();
          let api_error: ApiError = e.into();
          let response = api_error.error_response().map_into_right_body();
          return Ok(ServiceResponse::new(request, response));
        }
      };

      req.extensions_mut().insert(AuthenticatedUser {
        user_id: identity.user_id,
        email: identity.email,
      });

      // Call the next service
      let res = service.call(req).await?;
      Ok(res.map_into_left_body())
    })
  }
}

/// Extract the bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
  req
    .headers()
    .get("Authorization")
    .and_then(|h| h.to_str().ok())
    .and_then(|s| s.strip_prefix("Bearer "))
    .map(|s| s.to_string())
    .ok_or(ApiError::Unauthorized)
}

/// Extension trait to extract the authenticated identity from a request
pub trait AuthUserExt {
  /// Get the authenticated user from request extensions.
  ///
  /// Fails with `ApiError::Unauthorized` when called outside a scope
  /// protected by `AuthMiddleware`.
  fn authenticated_user(&self) -> Result<AuthenticatedUser, ApiError>;
}

impl AuthUserExt for actix_web::HttpRequest {
  fn authenticated_user(&self) -> Result<AuthenticatedUser, ApiError> {
    self
      .extensions()
      .get::<AuthenticatedUser>()
      .cloned()
      .ok_or(ApiError::Unauthorized)
  }
}
