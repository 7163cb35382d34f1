use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::{
  entities::UserAccount,
  errors::{AccountError, RepositoryError},
  ports::UserRepository,
  value_objects::{Email, VerificationCode},
};

/// PostgreSQL implementation of the UserRepository trait
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for the users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  first_name: String,
  last_name: String,
  email: String,
  password_hash: String,
  is_verified: bool,
  verification_code: Option<String>,
  verification_code_expires_at: Option<DateTime<Utc>>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserAccount {
  fn from(row: UserRow) -> Self {
    UserAccount {
      id: row.id,
      first_name: row.first_name,
      last_name: row.last_name,
      email: row.email,
      password_hash: row.password_hash,
      is_verified: row.is_verified,
      verification_code: row.verification_code,
      verification_code_expires_at: row.verification_code_expires_at,
      created_at: row.created_at,
      updated_at: row.updated_at,
    }
  }
}

const USER_COLUMNS: &str = r#"
    id,
    first_name,
    last_name,
    email,
    password_hash,
    is_verified,
    verification_code,
    verification_code_expires_at,
    created_at,
    updated_at
"#;

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn insert(&self, account: UserAccount) -> Result<UserAccount, AccountError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            INSERT INTO users (
                id,
                first_name,
                last_name,
                email,
                password_hash,
                is_verified,
                verification_code,
                verification_code_expires_at,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {USER_COLUMNS}
            "#
    ))
    .bind(account.id)
    .bind(&account.first_name)
    .bind(&account.last_name)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(account.is_verified)
    .bind(&account.verification_code)
    .bind(account.verification_code_expires_at)
    .bind(account.created_at)
    .bind(account.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, AccountError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE id = $1
            "#
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, AccountError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            SELECT {USER_COLUMNS}
            FROM users
            WHERE email = $1
            "#
    ))
    .bind(email.as_str())
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn find_all(&self) -> Result<Vec<UserAccount>, AccountError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            SELECT {USER_COLUMNS}
            FROM users
            ORDER BY created_at
            "#
    ))
    .fetch_all(&self.pool)
    .await?;

    Ok(result.into_iter().map(Into::into).collect())
  }

  async fn update(&self, account: UserAccount) -> Result<UserAccount, AccountError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            UPDATE users
            SET
                first_name = $2,
                last_name = $3,
                email = $4,
                password_hash = $5,
                is_verified = $6,
                verification_code = $7,
                verification_code_expires_at = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
    ))
    .bind(account.id)
    .bind(&account.first_name)
    .bind(&account.last_name)
    .bind(&account.email)
    .bind(&account.password_hash)
    .bind(account.is_verified)
    .bind(&account.verification_code)
    .bind(account.verification_code_expires_at)
    .bind(account.updated_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::RowNotFound) => Err(AccountError::Repository(RepositoryError::NotFound)),
      Err(e) => Err(e.into()),
    }
  }

  async fn delete(&self, id: Uuid) -> Result<Option<UserAccount>, AccountError> {
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            DELETE FROM users
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
    ))
    .bind(id)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }

  async fn store_verification_code(
    &self,
    id: Uuid,
    code: &VerificationCode,
    expires_at: DateTime<Utc>,
  ) -> Result<bool, AccountError> {
    // Single guarded statement: a verified account never receives a code,
    // and any prior code is replaced in the same write.
    let result = sqlx::query(
      r#"
            UPDATE users
            SET
                verification_code = $2,
                verification_code_expires_at = $3,
                updated_at = NOW()
            WHERE id = $1 AND is_verified = FALSE
            "#,
    )
    .bind(id)
    .bind(code.as_str())
    .bind(expires_at)
    .execute(&self.pool)
    .await?;

    Ok(result.rows_affected() > 0)
  }

  async fn consume_verification_code(
    &self,
    id: Uuid,
    submitted: &str,
  ) -> Result<Option<UserAccount>, AccountError> {
    // Compare-and-swap: the code comparison and the verified flip are one
    // statement, so a replayed or superseded code can never verify twice.
    let result = sqlx::query_as::<_, UserRow>(&format!(
      r#"
            UPDATE users
            SET
                is_verified = TRUE,
                verification_code = NULL,
                verification_code_expires_at = NULL,
                updated_at = NOW()
            WHERE id = $1
              AND is_verified = FALSE
              AND verification_code = $2
              AND verification_code_expires_at > NOW()
            RETURNING {USER_COLUMNS}
            "#
    ))
    .bind(id)
    .bind(submitted)
    .fetch_optional(&self.pool)
    .await?;

    Ok(result.map(Into::into))
  }
}
