//! Authentication service - credential checks and token issuance.
//!
//! The signing key and token lifetime are injected at construction, so
//! handlers never reach into configuration.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::UserRepository;
use common::{AppError, AppResult, JwtConfig};
use domain::{HashCost, Password, User, TOKEN_TYPE_BEARER};

/// Plaintext hashed once per authenticator to equalise rejection cost
const DUMMY_PASSWORD: &str = "dummy-password-for-timing";

/// JWT claims payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub name: String,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful authentication
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token
    pub access_token: String,
    /// Token type (always "Bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Check credentials and issue a signed token.
    ///
    /// Unknown email, wrong password and a failed lookup are all reported as
    /// [`AppError::InvalidCredentials`].
    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse>;

    /// Verify JWT token and extract claims
    fn verify_token(&self, token: &str) -> AppResult<Claims>;
}

/// Concrete implementation of AuthService backed by the user repository.
pub struct Authenticator {
    repo: Arc<dyn UserRepository>,
    jwt: JwtConfig,
    hash_cost: HashCost,
    dummy_hash: OnceCell<Password>,
}

impl Authenticator {
    /// Create new auth service instance
    pub fn new(repo: Arc<dyn UserRepository>, jwt: JwtConfig, hash_cost: HashCost) -> Self {
        Self {
            repo,
            jwt,
            hash_cost,
            dummy_hash: OnceCell::new(),
        }
    }

    fn jwt_secret_bytes(&self) -> &[u8] {
        self.jwt.secret.as_bytes()
    }

    /// Hash verified against when the email is unknown.
    fn dummy_hash(&self) -> AppResult<&Password> {
        self.dummy_hash
            .get_or_try_init(|| Password::with_cost(DUMMY_PASSWORD, &self.hash_cost))
            .map_err(AppError::from)
    }

    /// Generate JWT token for a user
    fn generate_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = Duration::try_seconds(self.jwt.expires_in_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                AppError::internal(format!(
                    "token lifetime out of range: {}s",
                    self.jwt.expires_in_seconds
                ))
            })?;

        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        // A signing failure is a server fault, not a rejected login
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret_bytes()),
        )
        .map_err(|e| AppError::internal(format!("token signing failed: {}", e)))?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt.expires_in_seconds,
        })
    }
}

#[async_trait]
impl AuthService for Authenticator {
    async fn login(&self, email: &str, password: &str) -> AppResult<TokenResponse> {
        let user = match self.repo.find_by_email(email).await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!("User lookup failed during login: {:?}", e);
                None
            }
        };

        // Verify even when the user is missing so both paths cost the same
        let password_valid = match &user {
            Some(user) => user.check_password(password),
            None => {
                match self.dummy_hash() {
                    Ok(dummy) => {
                        dummy.verify(password);
                    }
                    Err(e) => tracing::error!("Dummy hash unavailable during login: {:?}", e),
                }
                false
            }
        };

        match user {
            Some(user) if password_valid => {
                tracing::info!(user_id = %user.id, "Token issued");
                self.generate_token(&user)
            }
            _ => Err(AppError::InvalidCredentials),
        }
    }

    fn verify_token(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUserRepository;
    use mockall::predicate::eq;

    const SECRET: &str = "test-secret-key-minimum-32-chars!!";

    fn cheap() -> HashCost {
        HashCost::new(8, 1, 1)
    }

    fn authenticator(repo: MockUserRepository) -> Authenticator {
        Authenticator::new(Arc::new(repo), JwtConfig::new(SECRET, 300), cheap())
    }

    fn test_user() -> User {
        User::with_cost("test", "test@test.com", "test1", &cheap()).unwrap()
    }

    #[tokio::test]
    async fn test_login_issues_token_with_claims() {
        let user = test_user();
        let expected = user.clone();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("test@test.com"))
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(repo);
        let token = auth.login("test@test.com", "test1").await.unwrap();

        assert_eq!(token.token_type, "Bearer");
        assert_eq!(token.expires_in, 300);

        let claims = auth.verify_token(&token.access_token).unwrap();
        assert_eq!(claims.sub, expected.id);
        assert_eq!(claims.name, "test");
        assert_eq!(claims.email, "test@test.com");
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let user = test_user();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("test@test.com"))
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email()
            .with(eq("nobody@test.com"))
            .returning(|_| Ok(None));

        let auth = authenticator(repo);

        let wrong_password = auth.login("test@test.com", "wrong").await.unwrap_err();
        let unknown_email = auth.login("nobody@test.com", "test1").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
        assert_eq!(wrong_password.user_message(), unknown_email.user_message());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_rejection() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Err(AppError::internal("connection reset")));

        let auth = authenticator(repo);
        let result = auth.login("test@test.com", "test1").await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_empty_password_is_rejected() {
        let user = test_user();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(user.clone())));

        let auth = authenticator(repo);
        let result = auth.login("test@test.com", "").await;

        assert!(matches!(result, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_verify_token_rejects_other_key() {
        let user = test_user();
        let other = Authenticator::new(
            Arc::new(MockUserRepository::new()),
            JwtConfig::new("another-secret-key-minimum-32-chars", 300),
            cheap(),
        );
        let token = other.generate_token(&user).unwrap();

        let auth = authenticator(MockUserRepository::new());
        assert!(matches!(
            auth.verify_token(&token.access_token),
            Err(AppError::Jwt(_))
        ));
        assert!(auth.verify_token("not.a.token").is_err());
    }

    #[tokio::test]
    async fn test_unusable_hash_cost_still_rejects_uniformly() {
        let user = test_user();

        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .with(eq("test@test.com"))
            .returning(move |_| Ok(Some(user.clone())));
        repo.expect_find_by_email()
            .with(eq("nobody@test.com"))
            .returning(|_| Ok(None));

        let auth = Authenticator::new(
            Arc::new(repo),
            JwtConfig::new(SECRET, 300),
            HashCost::new(8, 0, 1),
        );

        let wrong_password = auth.login("test@test.com", "wrong").await.unwrap_err();
        let unknown_email = auth.login("nobody@test.com", "test1").await.unwrap_err();

        assert!(matches!(wrong_password, AppError::InvalidCredentials));
        assert!(matches!(unknown_email, AppError::InvalidCredentials));
    }

    #[test]
    fn test_oversized_lifetime_is_internal_error() {
        let user = test_user();
        let auth = Authenticator::new(
            Arc::new(MockUserRepository::new()),
            JwtConfig::new(SECRET, i64::MAX),
            cheap(),
        );

        assert!(matches!(
            auth.generate_token(&user),
            Err(AppError::Internal(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let user = test_user();
        let auth = Authenticator::new(
            Arc::new(MockUserRepository::new()),
            JwtConfig::new(SECRET, -3600),
            cheap(),
        );
        let token = auth.generate_token(&user).unwrap();

        assert!(matches!(
            auth.verify_token(&token.access_token),
            Err(AppError::Jwt(_))
        ));
    }
}
