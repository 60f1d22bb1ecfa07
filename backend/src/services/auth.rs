//! Authentication service for login, password changes, and token management

use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::user::UserRow;
use shared::models::{User, UserRole};
use shared::validation::check_password;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // User ID
    pub username: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies HS256 access tokens
#[derive(Clone)]
pub struct TokenSigner {
    secret: String,
    expiry_secs: i64,
}

impl TokenSigner {
    pub fn new(secret: impl Into<String>, expiry_secs: i64) -> Self {
        Self {
            secret: secret.into(),
            expiry_secs,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.jwt.secret.clone(), config.jwt.access_token_expiry)
    }

    pub fn expiry_secs(&self) -> i64 {
        self.expiry_secs
    }

    pub fn issue(&self, user_id: Uuid, username: &str, role: UserRole) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role: role.as_str().to_string(),
            exp: (now + Duration::seconds(self.expiry_secs)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Validate access token and return claims
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
    }
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    db: PgPool,
    signer: TokenSigner,
}

/// Login request body
#[derive(Debug, Deserialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

/// Response after successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub username: String,
    pub role: UserRole,
}

/// Password change request body
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordInput {
    pub current_password: String,
    #[validate(custom = "check_password")]
    pub new_password: String,
}

/// Hash a password with bcrypt
pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    verify(password, password_hash)
        .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        Self {
            db,
            signer: TokenSigner::from_config(config),
        }
    }

    /// Authenticate user with username and password
    pub async fn login(&self, input: LoginInput) -> AppResult<LoginResponse> {
        let user = self
            .find_row_by_username(input.username.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::warn!(username = %user.username, "Failed login attempt");
            return Err(AppError::InvalidCredentials);
        }

        let role = user.role();
        let access_token = self.signer.issue(user.id, &user.username, role)?;

        tracing::info!(username = %user.username, "User logged in");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.signer.expiry_secs(),
            username: user.username,
            role,
        })
    }

    /// Current user's account
    pub async fn me(&self, user_id: Uuid) -> AppResult<User> {
        let row = self
            .find_row_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;
        Ok(row.into())
    }

    /// Change the password of the given user
    pub async fn change_password(&self, user_id: Uuid, input: ChangePasswordInput) -> AppResult<()> {
        input.validate()?;

        let row = self
            .find_row_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        if !verify_password(&input.current_password, &row.password_hash)? {
            return Err(AppError::Unauthorized {
                message: "Current password is incorrect".to_string(),
                message_tr: "Mevcut şifre hatalı".to_string(),
            });
        }

        let password_hash = hash_password(&input.new_password)?;
        sqlx::query("UPDATE users SET password_hash = $1 WHERE id = $2")
            .bind(&password_hash)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        tracing::info!(username = %row.username, "Password changed");
        Ok(())
    }

    /// Create the bootstrap admin account when it does not exist yet
    pub async fn ensure_admin(&self, username: &str, password: &str) -> AppResult<()> {
        if self.find_row_by_username(username).await?.is_some() {
            return Ok(());
        }

        let password_hash = hash_password(password)?;
        sqlx::query(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (username) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(&password_hash)
        .bind(UserRole::Admin.as_str())
        .execute(&self.db)
        .await?;

        tracing::info!(username, "Created bootstrap admin account");
        Ok(())
    }

    async fn find_row_by_username(&self, username: &str) -> AppResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }

    async fn find_row_by_id(&self, user_id: Uuid) -> AppResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_carries_role() {
        let signer = TokenSigner::new("test-secret", 3600);
        let id = Uuid::new_v4();
        let token = signer.issue(id, "depo", UserRole::Viewer).unwrap();

        let claims = signer.verify(&token).unwrap();
        assert_eq!(claims.sub, id.to_string());
        assert_eq!(claims.username, "depo");
        assert_eq!(claims.role, "viewer");
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = TokenSigner::new("secret-a", 3600)
            .issue(Uuid::new_v4(), "admin", UserRole::Admin)
            .unwrap();
        let result = TokenSigner::new("secret-b", 3600).verify(&token);
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        // Beyond the default 60 s leeway
        let token = TokenSigner::new("test-secret", -600)
            .issue(Uuid::new_v4(), "admin", UserRole::Admin)
            .unwrap();
        let result = TokenSigner::new("test-secret", 3600).verify(&token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_password_hash_verifies() {
        let hashed = hash_password("SAR2025!").unwrap();
        assert!(verify_password("SAR2025!", &hashed).unwrap());
        assert!(!verify_password("wrong", &hashed).unwrap());
    }

    #[test]
    fn test_short_new_password_is_rejected() {
        let input = ChangePasswordInput {
            current_password: "old-password".to_string(),
            new_password: "12345".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
