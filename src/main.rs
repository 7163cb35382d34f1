use actix_web::{App, HttpServer, middleware::Logger, web};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use userbase::{
  adapters::http::{RequestIdMiddleware, UserRouteDependencies, configure_user_routes},
  application::account::{
    AuthenticateUseCase, DeleteUserUseCase, GetUserUseCase, ListUsersUseCase, LoginUserUseCase,
    RegisterUserUseCase, RequestVerificationCodeUseCase, UpdateUserUseCase, VerifyUserUseCase,
  },
  domain::account::services::{AccountService, AccountServiceConfig},
  infrastructure::{
    config::Config,
    persistence::postgres::{PostgresSessionRepository, PostgresUserRepository},
    security::{Argon2PasswordHasher, SecureCodeGenerator},
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "userbase=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting userbase service");

  // Load configuration
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database: {}", config.database.url);

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(
      std::io::ErrorKind::TimedOut,
      format!(
        "Database connection timed out after {} seconds",
        config.database.connect_timeout_seconds
      ),
    )
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    match e {
      sqlx::Error::Io(_) => std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        format!(
          "Could not connect to database. Is PostgreSQL running at {}?",
          config.database.url
        ),
      ),
      _ => std::io::Error::other(format!("Database error: {}", e)),
    }
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let session_repo = Arc::new(PostgresSessionRepository::new(db_pool.clone()));

  // Initialize security services
  let password_hasher =
    Arc::new(Argon2PasswordHasher::new().expect("Failed to create password hasher"));
  let code_generator = Arc::new(SecureCodeGenerator::new());

  // Initialize domain service
  let account_config = AccountServiceConfig {
    session_ttl_seconds: config.security.session_ttl_seconds as i64,
    verification_code_ttl_seconds: config.security.verification_code_ttl_seconds as i64,
  };

  let account_service = Arc::new(AccountService::new(
    user_repo,
    session_repo,
    password_hasher,
    code_generator,
    account_config,
  ));

  // Initialize use cases
  let register_use_case = Arc::new(RegisterUserUseCase::new(account_service.clone()));
  let login_use_case = Arc::new(LoginUserUseCase::new(account_service.clone()));
  let authenticate_use_case = Arc::new(AuthenticateUseCase::new(account_service.clone()));
  let request_verification_code_use_case =
    Arc::new(RequestVerificationCodeUseCase::new(account_service.clone()));
  let verify_user_use_case = Arc::new(VerifyUserUseCase::new(account_service.clone()));
  let list_users_use_case = Arc::new(ListUsersUseCase::new(account_service.clone()));
  let get_user_use_case = Arc::new(GetUserUseCase::new(account_service.clone()));
  let update_user_use_case = Arc::new(UpdateUserUseCase::new(account_service.clone()));
  let delete_user_use_case = Arc::new(DeleteUserUseCase::new(account_service.clone()));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    App::new()
      // Add request ID middleware
      .wrap(RequestIdMiddleware::new())
      // Add logging middleware
      .wrap(Logger::default())
      // Configure the user routes
      .service(web::scope("/users").configure(|cfg| {
        configure_user_routes(
          cfg,
          UserRouteDependencies {
            register_use_case: register_use_case.clone(),
            login_use_case: login_use_case.clone(),
            authenticate_use_case: authenticate_use_case.clone(),
            request_verification_code_use_case: request_verification_code_use_case.clone(),
            verify_user_use_case: verify_user_use_case.clone(),
            list_users_use_case: list_users_use_case.clone(),
            get_user_use_case: get_user_use_case.clone(),
            update_user_use_case: update_user_use_case.clone(),
            delete_user_use_case: delete_user_use_case.clone(),
          },
        )
      }))
      // Health check endpoint
      .route("/health", web::get().to(health_check))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
