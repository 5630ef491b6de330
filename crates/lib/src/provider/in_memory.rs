//! In-memory identity provider implementation
//!
//! Reference implementation of the [`IdentityProvider`] boundary, suitable
//! for testing, development, or demos. Accounts live in a `HashMap` keyed by
//! lowercased email; passwords are stored as Argon2id hashes.

use std::collections::HashMap;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core},
};
use async_trait::async_trait;
use tokio::sync::{RwLock, watch};
use uuid::Uuid;

use super::{Identity, IdentityProvider, errors::ProviderError};
use crate::{Result, constants::MIN_PASSWORD_LENGTH};

/// A registered account.
#[derive(Debug, Clone)]
struct Account {
    id: String,
    email: String,
    /// Argon2id hash in PHC string format.
    password_hash: String,
}

/// A simple in-memory identity provider backed by a `HashMap`.
///
/// Enforces the same rules a hosted provider would: duplicate emails are
/// rejected and passwords shorter than the minimum length are refused as
/// weak. Session state is a watch channel, so every subscriber sees the
/// current identity immediately and every change thereafter.
#[derive(Debug)]
pub struct InMemoryProvider {
    /// Accounts keyed by lowercased email
    accounts: RwLock<HashMap<String, Account>>,
    /// Current session state; `None` means signed out
    session: watch::Sender<Option<Identity>>,
}

impl InMemoryProvider {
    /// Creates a new provider with no accounts and no session.
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            session,
        }
    }
}

impl Default for InMemoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryProvider {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Identity> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(ProviderError::WeakPassword {
                reason: format!("password must be at least {MIN_PASSWORD_LENGTH} characters"),
            }
            .into());
        }

        let email = email.trim();
        let email_key = email.to_lowercase();

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email_key) {
            return Err(ProviderError::EmailAlreadyInUse {
                email: email.to_string(),
            }
            .into());
        }

        let identity = Identity {
            id: Uuid::new_v4().to_string(),
            email: email.to_string(),
        };
        accounts.insert(
            email_key,
            Account {
                id: identity.id.clone(),
                email: identity.email.clone(),
                password_hash: hash_password(password)?,
            },
        );
        drop(accounts);

        // Account creation signs the principal in, matching hosted providers.
        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Identity> {
        let email_key = email.trim().to_lowercase();

        let accounts = self.accounts.read().await;
        let Some(account) = accounts.get(&email_key) else {
            return Err(ProviderError::InvalidCredentials.into());
        };
        verify_password(password, &account.password_hash)?;

        let identity = Identity {
            id: account.id.clone(),
            email: account.email.clone(),
        };
        drop(accounts);

        self.session.send_replace(Some(identity.clone()));
        Ok(identity)
    }

    async fn sign_out(&self) -> Result<()> {
        self.session.send_replace(None);
        Ok(())
    }

    fn current_identity(&self) -> Option<Identity> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.session.subscribe()
    }
}

/// Hash a password using Argon2id, returning the PHC format string.
fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut rand_core::OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ProviderError::Internal {
            reason: format!("password hashing failed: {e}"),
        })?;
    Ok(hash.to_string())
}

/// Verify a password against its stored hash.
fn verify_password(password: &str, password_hash: &str) -> Result<()> {
    let parsed_hash =
        PasswordHash::new(password_hash).map_err(|_| ProviderError::InvalidCredentials)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| ProviderError::InvalidCredentials.into())
}
