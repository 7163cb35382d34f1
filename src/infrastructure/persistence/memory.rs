use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::domain::account::{
  entities::{Session, UserAccount},
  errors::{AccountError, RepositoryError},
  ports::{SessionRepository, UserRepository},
  value_objects::{Email, VerificationCode},
};

/// In-memory implementation of the UserRepository trait.
///
/// Backs the test suites and local experimentation. All operations take
/// the single map lock, which gives the verification-code issue/consume
/// sequence the same atomicity the Postgres implementation gets from its
/// guarded statements.
#[derive(Default)]
pub struct InMemoryUserRepository {
  accounts: Mutex<HashMap<Uuid, UserAccount>>,
}

impl InMemoryUserRepository {
  /// Creates an empty repository
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn insert(&self, account: UserAccount) -> Result<UserAccount, AccountError> {
    let mut accounts = self.accounts.lock().unwrap();

    if accounts.values().any(|a| a.email == account.email) {
      return Err(AccountError::Repository(RepositoryError::DuplicateKey(
        account.email.clone(),
      )));
    }

    accounts.insert(account.id, account.clone());
    Ok(account)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<UserAccount>, AccountError> {
    let accounts = self.accounts.lock().unwrap();
    Ok(accounts.get(&id).cloned())
  }

  async fn find_by_email(&self, email: &Email) -> Result<Option<UserAccount>, AccountError> {
    let accounts = self.accounts.lock().unwrap();
    Ok(accounts.values().find(|a| a.email == email.as_str()).cloned())
  }

  async fn find_all(&self) -> Result<Vec<UserAccount>, AccountError> {
    let accounts = self.accounts.lock().unwrap();
    let mut all: Vec<UserAccount> = accounts.values().cloned().collect();
    all.sort_by_key(|a| a.created_at);
    Ok(all)
  }

  async fn update(&self, account: UserAccount) -> Result<UserAccount, AccountError> {
    let mut accounts = self.accounts.lock().unwrap();

    if !accounts.contains_key(&account.id) {
      return Err(AccountError::Repository(RepositoryError::NotFound));
    }

    if accounts
      .values()
      .any(|a| a.id != account.id && a.email == account.email)
    {
      return Err(AccountError::Repository(RepositoryError::DuplicateKey(
        account.email.clone(),
      )));
    }

    accounts.insert(account.id, account.clone());
    Ok(account)
  }

  async fn delete(&self, id: Uuid) -> Result<Option<UserAccount>, AccountError> {
    let mut accounts = self.accounts.lock().unwrap();
    Ok(accounts.remove(&id))
  }

  async fn store_verification_code(
    &self,
    id: Uuid,
    code: &VerificationCode,
    expires_at: DateTime<Utc>,
  ) -> Result<bool, AccountError> {
    let mut accounts = self.accounts.lock().unwrap();

    match accounts.get_mut(&id) {
      Some(account) if !account.is_verified => {
        account.verification_code = Some(code.as_str().to_string());
        account.verification_code_expires_at = Some(expires_at);
        account.updated_at = Utc::now();
        Ok(true)
      }
      _ => Ok(false),
    }
  }

  async fn consume_verification_code(
    &self,
    id: Uuid,
    submitted: &str,
  ) -> Result<Option<UserAccount>, AccountError> {
    let mut accounts = self.accounts.lock().unwrap();

    let Some(account) = accounts.get_mut(&id) else {
      return Ok(None);
    };

    if account.is_verified || !account.verification_code_matches(submitted) {
      return Ok(None);
    }

    account.verify();
    Ok(Some(account.clone()))
  }
}

/// In-memory implementation of the SessionRepository trait
#[derive(Default)]
pub struct InMemorySessionRepository {
  sessions: Mutex<HashMap<Uuid, Session>>,
}

impl InMemorySessionRepository {
  /// Creates an empty repository
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
  async fn create(&self, session: Session) -> Result<Session, AccountError> {
    let mut sessions = self.sessions.lock().unwrap();
    sessions.insert(session.id, session.clone());
    Ok(session)
  }

  async fn find_by_token_hash(&self, token_hash: &str) -> Result<Option<Session>, AccountError> {
    let sessions = self.sessions.lock().unwrap();
    Ok(
      sessions
        .values()
        .find(|s| s.token_hash == token_hash)
        .cloned(),
    )
  }

  async fn delete(&self, session_id: Uuid) -> Result<(), AccountError> {
    let mut sessions = self.sessions.lock().unwrap();
    sessions.remove(&session_id);
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Duration;
  use std::sync::Arc;

  fn account(email: &str) -> UserAccount {
    UserAccount::new(
      "Ada".to_string(),
      "Lovelace".to_string(),
      email.to_string(),
      "hashed_password".to_string(),
    )
  }

  #[tokio::test]
  async fn test_insert_rejects_duplicate_email() {
    let repo = InMemoryUserRepository::new();

    repo.insert(account("ada@example.com")).await.unwrap();
    let result = repo.insert(account("ada@example.com")).await;

    assert!(matches!(
      result,
      Err(AccountError::Repository(RepositoryError::DuplicateKey(_)))
    ));
  }

  #[tokio::test]
  async fn test_delete_returns_removed_record_once() {
    let repo = InMemoryUserRepository::new();
    let stored = repo.insert(account("ada@example.com")).await.unwrap();

    let first = repo.delete(stored.id).await.unwrap();
    let second = repo.delete(stored.id).await.unwrap();

    assert_eq!(first.map(|a| a.id), Some(stored.id));
    assert!(second.is_none());
  }

  #[tokio::test]
  async fn test_store_code_refuses_verified_account() {
    let repo = InMemoryUserRepository::new();
    let stored = repo.insert(account("ada@example.com")).await.unwrap();
    let code = VerificationCode::from_string("482913").unwrap();

    let expires_at = Utc::now() + Duration::minutes(15);
    assert!(repo.store_verification_code(stored.id, &code, expires_at).await.unwrap());

    repo
      .consume_verification_code(stored.id, "482913")
      .await
      .unwrap()
      .unwrap();

    assert!(!repo.store_verification_code(stored.id, &code, expires_at).await.unwrap());
  }

  #[tokio::test]
  async fn test_consume_rejects_expired_code() {
    let repo = InMemoryUserRepository::new();
    let stored = repo.insert(account("ada@example.com")).await.unwrap();
    let code = VerificationCode::from_string("482913").unwrap();

    let expires_at = Utc::now() - Duration::seconds(1);
    repo
      .store_verification_code(stored.id, &code, expires_at)
      .await
      .unwrap();

    let result = repo.consume_verification_code(stored.id, "482913").await.unwrap();
    assert!(result.is_none());
  }

  #[tokio::test]
  async fn test_concurrent_consume_succeeds_exactly_once() {
    let repo = Arc::new(InMemoryUserRepository::new());
    let stored = repo.insert(account("ada@example.com")).await.unwrap();
    let code = VerificationCode::from_string("482913").unwrap();

    repo
      .store_verification_code(stored.id, &code, Utc::now() + Duration::minutes(15))
      .await
      .unwrap();

    let mut tasks = Vec::new();
    for _ in 0..16 {
      let repo = Arc::clone(&repo);
      let id = stored.id;
      tasks.push(tokio::spawn(async move {
        repo.consume_verification_code(id, "482913").await.unwrap()
      }));
    }

    let mut successes = 0;
    for task in tasks {
      if task.await.unwrap().is_some() {
        successes += 1;
      }
    }

    assert_eq!(successes, 1);
  }

  #[tokio::test]
  async fn test_session_round_trip() {
    let repo = InMemorySessionRepository::new();
    let session = Session::with_duration(Uuid::new_v4(), "hash".to_string(), Duration::hours(1));

    repo.create(session.clone()).await.unwrap();

    let found = repo.find_by_token_hash("hash").await.unwrap();
    assert_eq!(found.map(|s| s.id), Some(session.id));

    repo.delete(session.id).await.unwrap();
    assert!(repo.find_by_token_hash("hash").await.unwrap().is_none());
  }
}
