//! Student accounts: registration and login against a directory port.
//!
//! Credentials are stored as salted SHA-256 digests; the service never keeps
//! or compares plaintext passwords.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::info;

/// Salted password digest. The salt is per-account and random.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDigest {
    salt: String,
    digest: String,
}

impl CredentialDigest {
    pub fn derive(password: &str) -> Self {
        let mut salt = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut salt);
        Self::with_salt(&salt, password)
    }

    fn with_salt(salt: &[u8], password: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(salt);
        hasher.update(password.as_bytes());
        Self {
            salt: BASE64.encode(salt),
            digest: BASE64.encode(hasher.finalize()),
        }
    }

    pub fn matches(&self, password: &str) -> bool {
        let Ok(salt) = BASE64.decode(&self.salt) else {
            return false;
        };
        Self::with_salt(&salt, password).digest == self.digest
    }
}

/// Stored account record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentAccount {
    pub student_id: String,
    pub full_name: String,
    pub email: String,
    pub credential: CredentialDigest,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

/// Public projection returned to callers after authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentProfile {
    pub student_id: String,
    pub full_name: String,
    pub email: String,
}

impl From<&StudentAccount> for StudentProfile {
    fn from(account: &StudentAccount) -> Self {
        Self {
            student_id: account.student_id.clone(),
            full_name: account.full_name.clone(),
            email: account.email.clone(),
        }
    }
}

/// Directory abstraction over the user table.
pub trait AccountDirectory: Send + Sync {
    fn fetch(&self, student_id: &str) -> Result<Option<StudentAccount>, DirectoryError>;
    fn insert(&self, account: StudentAccount) -> Result<(), DirectoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("account already exists")]
    Conflict,
    #[error("account directory unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AccountError {
    #[error("all fields are required")]
    MissingFields,
    #[error("student ID already exists")]
    Duplicate,
    #[error("invalid Student ID or password")]
    InvalidCredentials,
    #[error(transparent)]
    Directory(DirectoryError),
}

#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub student_id: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
}

/// Create a new account. Duplicate ids are rejected before the insert so the
/// caller gets a stable error either way.
pub fn register<D: AccountDirectory>(
    directory: &D,
    request: RegistrationRequest,
) -> Result<StudentProfile, AccountError> {
    let student_id = request.student_id.trim();
    let full_name = request.full_name.trim();
    let email = request.email.trim();
    let password = request.password.trim();

    if student_id.is_empty() || full_name.is_empty() || email.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields);
    }

    match directory.fetch(student_id) {
        Ok(Some(_)) => return Err(AccountError::Duplicate),
        Ok(None) => {}
        Err(err) => return Err(AccountError::Directory(err)),
    }

    let account = StudentAccount {
        student_id: student_id.to_string(),
        full_name: full_name.to_string(),
        email: email.to_string(),
        credential: CredentialDigest::derive(password),
        created_at: Utc::now(),
        active: true,
    };

    match directory.insert(account.clone()) {
        Ok(()) => {
            info!(student_id, "registered new account");
            Ok(StudentProfile::from(&account))
        }
        Err(DirectoryError::Conflict) => Err(AccountError::Duplicate),
        Err(err) => Err(AccountError::Directory(err)),
    }
}

/// Verify credentials. Unknown ids and wrong passwords produce the same
/// error so the response does not leak which one was wrong.
pub fn login<D: AccountDirectory>(
    directory: &D,
    student_id: &str,
    password: &str,
) -> Result<StudentProfile, AccountError> {
    let student_id = student_id.trim();
    let password = password.trim();

    if student_id.is_empty() || password.is_empty() {
        return Err(AccountError::MissingFields);
    }

    let account = match directory.fetch(student_id) {
        Ok(Some(account)) => account,
        Ok(None) => return Err(AccountError::InvalidCredentials),
        Err(err) => return Err(AccountError::Directory(err)),
    };

    if !account.active || !account.credential.matches(password) {
        return Err(AccountError::InvalidCredentials);
    }

    Ok(StudentProfile::from(&account))
}
