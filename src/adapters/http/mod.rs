pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;

// Re-export commonly used types
pub use dtos::{
  ErrorResponse, LoginData, LoginEnvelope, LoginRequest, MessageResponse, RegisterRequest,
  UpdateUserRequest, UserEnvelope, UserListEnvelope, UserResponse, VerifyUserRequest,
};
pub use errors::ApiError;
pub use middleware::{AuthMiddleware, AuthUserExt, AuthenticatedUser, RequestIdMiddleware};
pub use routes::{UserRouteDependencies, configure_user_routes};
