//! Administrator authentication: the claims-validator seam and the token-backed
//! validator shipped with the binary.

use std::sync::Arc;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::application::repos::{
    AdminAccountsRepo, CreateAdminAccountParams, CreateAdminTokenParams, RepoError,
};
use crate::domain::entities::{AdminAccountRecord, AdminClaims};

const TOKEN_PREFIX: &str = "fa";
const PREFIX_LEN: usize = 12;
const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimsError {
    #[error("missing admin credential")]
    Missing,
    #[error("invalid admin credential")]
    Invalid,
    #[error("revoked admin credential")]
    Revoked,
    /// The credential could not be checked because the store failed.
    #[error("admin credential store unavailable: {message}")]
    Unavailable { message: String },
}

impl ClaimsError {
    pub fn unavailable(err: &RepoError) -> Self {
        Self::Unavailable {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdminGateError {
    #[error(transparent)]
    Authentication(#[from] ClaimsError),
    #[error("credential accepted but no admin identity is attached")]
    MissingIdentity,
}

/// Turns the credential carried by a request into an administrator identity.
///
/// `Ok(None)` means the credential was accepted but no identity is attached
/// to it any more.
#[async_trait]
pub trait ClaimsValidator: Send + Sync {
    async fn validate(&self, credential: Option<&str>)
    -> Result<Option<AdminClaims>, ClaimsError>;
}

/// Gate every admin operation runs first.
pub async fn resolve_identity(
    validator: &dyn ClaimsValidator,
    credential: Option<&str>,
) -> Result<AdminClaims, AdminGateError> {
    match validator.validate(credential).await? {
        Some(claims) => Ok(claims),
        None => Err(AdminGateError::MissingIdentity),
    }
}

#[derive(Debug, Error)]
pub enum AdminTokenError {
    #[error("`{0}` must not be empty")]
    ConstraintViolation(&'static str),
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Debug, Clone)]
pub struct IssuedAdminToken {
    pub account: AdminAccountRecord,
    pub token: String,
}

#[derive(Clone)]
pub struct AdminTokenValidator {
    repo: Arc<dyn AdminAccountsRepo>,
}

impl AdminTokenValidator {
    pub fn new(repo: Arc<dyn AdminAccountsRepo>) -> Self {
        Self { repo }
    }

    /// Create an admin account and return its token. The plaintext token is
    /// only ever available here.
    pub async fn issue_token(
        &self,
        name: &str,
        email: &str,
    ) -> Result<IssuedAdminToken, AdminTokenError> {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() {
            return Err(AdminTokenError::ConstraintViolation("name"));
        }
        if email.is_empty() {
            return Err(AdminTokenError::ConstraintViolation("email"));
        }

        let account = self
            .repo
            .create_account(CreateAdminAccountParams {
                email: email.to_string(),
                name: name.to_string(),
            })
            .await?;

        let prefix = Self::generate_prefix();
        let secret = Self::generate_secret();
        let token = format!("{TOKEN_PREFIX}_{prefix}_{secret}");

        self.repo
            .create_token(CreateAdminTokenParams {
                admin_id: account.id,
                prefix,
                hashed_secret: Self::hash_secret(&secret),
            })
            .await?;

        Ok(IssuedAdminToken { account, token })
    }

    fn hash_secret(secret: &str) -> Vec<u8> {
        let mut hasher = Sha256::new();
        hasher.update(secret.as_bytes());
        hasher.finalize().to_vec()
    }

    fn generate_prefix() -> String {
        Uuid::new_v4().simple().to_string()[..PREFIX_LEN].to_string()
    }

    fn generate_secret() -> String {
        format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
    }

    fn parse_token(token: &str) -> Option<ParsedToken<'_>> {
        let mut parts = token.trim().splitn(3, '_');
        if parts.next()? != TOKEN_PREFIX {
            return None;
        }
        let prefix = parts.next()?;
        let secret = parts.next()?;
        if prefix.len() != PREFIX_LEN
            || !prefix.chars().all(|c| c.is_ascii_hexdigit())
            || secret.len() < MIN_SECRET_LEN
        {
            return None;
        }
        Some(ParsedToken { prefix, secret })
    }
}

struct ParsedToken<'a> {
    prefix: &'a str,
    secret: &'a str,
}

#[async_trait]
impl ClaimsValidator for AdminTokenValidator {
    async fn validate(
        &self,
        credential: Option<&str>,
    ) -> Result<Option<AdminClaims>, ClaimsError> {
        let credential = credential
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or(ClaimsError::Missing)?;
        let parsed = Self::parse_token(credential).ok_or(ClaimsError::Invalid)?;

        let record = self
            .repo
            .find_token_by_prefix(parsed.prefix)
            .await
            .map_err(|err| ClaimsError::unavailable(&err))?
            .ok_or(ClaimsError::Invalid)?;

        let hashed_input = Self::hash_secret(parsed.secret);
        if record.hashed_secret.ct_eq(&hashed_input).unwrap_u8() == 0 {
            return Err(ClaimsError::Invalid);
        }

        if let Some(revoked_at) = record.revoked_at
            && revoked_at <= OffsetDateTime::now_utc()
        {
            return Err(ClaimsError::Revoked);
        }

        let Some(admin_id) = record.admin_id else {
            return Ok(None);
        };

        let account = self
            .repo
            .find_account(admin_id)
            .await
            .map_err(|err| ClaimsError::unavailable(&err))?;

        Ok(account.map(AdminClaims::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use time::Duration;

    use crate::domain::entities::AdminTokenRecord;

    #[derive(Default)]
    struct MemoryAccounts {
        accounts: Mutex<Vec<AdminAccountRecord>>,
        tokens: Mutex<Vec<AdminTokenRecord>>,
        lookups_fail: Mutex<bool>,
    }

    impl MemoryAccounts {
        fn drop_account(&self, id: Uuid) {
            self.accounts.lock().unwrap().retain(|a| a.id != id);
            for token in self.tokens.lock().unwrap().iter_mut() {
                if token.admin_id == Some(id) {
                    token.admin_id = None;
                }
            }
        }

        fn fail_lookups(&self) {
            *self.lookups_fail.lock().unwrap() = true;
        }

        fn lookup_guard(&self) -> Result<(), RepoError> {
            if *self.lookups_fail.lock().unwrap() {
                return Err(RepoError::Timeout);
            }
            Ok(())
        }

        fn revoke_all(&self, at: OffsetDateTime) {
            for token in self.tokens.lock().unwrap().iter_mut() {
                token.revoked_at = Some(at);
            }
        }
    }

    #[async_trait]
    impl AdminAccountsRepo for MemoryAccounts {
        async fn find_token_by_prefix(
            &self,
            prefix: &str,
        ) -> Result<Option<AdminTokenRecord>, RepoError> {
            self.lookup_guard()?;
            Ok(self
                .tokens
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.prefix == prefix)
                .cloned())
        }

        async fn find_account(
            &self,
            id: Uuid,
        ) -> Result<Option<AdminAccountRecord>, RepoError> {
            self.lookup_guard()?;
            Ok(self
                .accounts
                .lock()
                .unwrap()
                .iter()
                .find(|a| a.id == id)
                .cloned())
        }

        async fn create_account(
            &self,
            params: CreateAdminAccountParams,
        ) -> Result<AdminAccountRecord, RepoError> {
            let record = AdminAccountRecord {
                id: Uuid::new_v4(),
                email: params.email,
                name: params.name,
                created_at: OffsetDateTime::now_utc(),
            };
            self.accounts.lock().unwrap().push(record.clone());
            Ok(record)
        }

        async fn create_token(
            &self,
            params: CreateAdminTokenParams,
        ) -> Result<AdminTokenRecord, RepoError> {
            let record = AdminTokenRecord {
                id: Uuid::new_v4(),
                admin_id: Some(params.admin_id),
                prefix: params.prefix,
                hashed_secret: params.hashed_secret,
                revoked_at: None,
                created_at: OffsetDateTime::now_utc(),
            };
            self.tokens.lock().unwrap().push(record.clone());
            Ok(record)
        }
    }

    struct FixedValidator(Result<Option<AdminClaims>, ClaimsError>);

    #[async_trait]
    impl ClaimsValidator for FixedValidator {
        async fn validate(
            &self,
            _credential: Option<&str>,
        ) -> Result<Option<AdminClaims>, ClaimsError> {
            self.0.clone()
        }
    }

    fn claims() -> AdminClaims {
        AdminClaims {
            subject: Uuid::new_v4(),
            email: "ada@example.com".into(),
            name: "Ada".into(),
        }
    }

    #[tokio::test]
    async fn gate_passes_identity_through() {
        let expected = claims();
        let validator = FixedValidator(Ok(Some(expected.clone())));
        let resolved = resolve_identity(&validator, Some("token"))
            .await
            .expect("identity");
        assert_eq!(resolved, expected);
    }

    #[tokio::test]
    async fn gate_distinguishes_missing_identity_from_authentication_failure() {
        let empty = FixedValidator(Ok(None));
        assert_eq!(
            resolve_identity(&empty, Some("token")).await,
            Err(AdminGateError::MissingIdentity)
        );

        let failing = FixedValidator(Err(ClaimsError::Revoked));
        assert_eq!(
            resolve_identity(&failing, Some("token")).await,
            Err(AdminGateError::Authentication(ClaimsError::Revoked))
        );
    }

    #[tokio::test]
    async fn issued_token_authenticates_its_account() {
        let repo = Arc::new(MemoryAccounts::default());
        let validator = AdminTokenValidator::new(repo.clone());

        let issued = validator
            .issue_token(" Ada ", "ada@example.com")
            .await
            .expect("issue");
        assert!(issued.token.starts_with("fa_"));

        let claims = validator
            .validate(Some(&issued.token))
            .await
            .expect("valid")
            .expect("identity");
        assert_eq!(claims.subject, issued.account.id);
        assert_eq!(claims.name, "Ada");
    }

    #[tokio::test]
    async fn rejects_missing_malformed_and_tampered_tokens() {
        let repo = Arc::new(MemoryAccounts::default());
        let validator = AdminTokenValidator::new(repo);
        let issued = validator
            .issue_token("Ada", "ada@example.com")
            .await
            .expect("issue");

        assert_eq!(validator.validate(None).await, Err(ClaimsError::Missing));
        assert_eq!(validator.validate(Some("  ")).await, Err(ClaimsError::Missing));
        assert_eq!(
            validator.validate(Some("sk_abc_short")).await,
            Err(ClaimsError::Invalid)
        );

        let mut tampered = issued.token.clone();
        tampered.pop();
        tampered.push('x');
        assert_eq!(
            validator.validate(Some(&tampered)).await,
            Err(ClaimsError::Invalid)
        );
    }

    #[tokio::test]
    async fn revoked_token_is_reported_as_revoked() {
        let repo = Arc::new(MemoryAccounts::default());
        let validator = AdminTokenValidator::new(repo.clone());
        let issued = validator
            .issue_token("Ada", "ada@example.com")
            .await
            .expect("issue");

        repo.revoke_all(OffsetDateTime::now_utc() - Duration::minutes(1));

        assert_eq!(
            validator.validate(Some(&issued.token)).await,
            Err(ClaimsError::Revoked)
        );
    }

    #[tokio::test]
    async fn store_failure_is_reported_as_unavailable() {
        let repo = Arc::new(MemoryAccounts::default());
        let validator = AdminTokenValidator::new(repo.clone());
        let issued = validator
            .issue_token("Ada", "ada@example.com")
            .await
            .expect("issue");

        repo.fail_lookups();

        assert_eq!(
            validator.validate(Some(&issued.token)).await,
            Err(ClaimsError::Unavailable {
                message: RepoError::Timeout.to_string(),
            })
        );
    }

    #[tokio::test]
    async fn token_of_deleted_account_yields_no_identity() {
        let repo = Arc::new(MemoryAccounts::default());
        let validator = AdminTokenValidator::new(repo.clone());
        let issued = validator
            .issue_token("Ada", "ada@example.com")
            .await
            .expect("issue");

        repo.drop_account(issued.account.id);

        assert_eq!(validator.validate(Some(&issued.token)).await, Ok(None));
    }

    #[tokio::test]
    async fn issue_rejects_blank_fields() {
        let validator = AdminTokenValidator::new(Arc::new(MemoryAccounts::default()));
        assert!(matches!(
            validator.issue_token(" ", "ada@example.com").await,
            Err(AdminTokenError::ConstraintViolation("name"))
        ));
        assert!(matches!(
            validator.issue_token("Ada", "").await,
            Err(AdminTokenError::ConstraintViolation("email"))
        ));
    }
}
