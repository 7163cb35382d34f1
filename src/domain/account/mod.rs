pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{Session, UserAccount};
pub use errors::{AccountError, HashError, RepositoryError};
pub use services::{AccountPatch, AccountService, AccountServiceConfig};
pub use value_objects::{
  Email, Password, PasswordHash, SessionToken, TokenHash, ValueObjectError, VerificationCode,
};
