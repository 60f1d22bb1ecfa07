//! User management service

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::auth::hash_password;
use shared::models::{User, UserRole};
use shared::validation::{check_password, check_username};

/// User service for account administration
#[derive(Clone)]
pub struct UserService {
    db: PgPool,
}

/// User row as stored, including the password hash
#[derive(Debug, sqlx::FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl UserRow {
    /// Unknown stored roles fall back to the read-only role
    pub fn role(&self) -> UserRole {
        UserRole::from_str(&self.role).unwrap_or_default()
    }
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        let role = row.role();
        User {
            id: row.id,
            username: row.username,
            role,
            created_at: row.created_at,
        }
    }
}

/// Input for creating a user
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserInput {
    #[validate(custom = "check_username")]
    pub username: String,
    #[validate(custom = "check_password")]
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
}

impl UserService {
    /// Create a new UserService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all users
    pub async fn list(&self) -> AppResult<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, role, created_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Create a new user
    pub async fn create(&self, input: CreateUserInput) -> AppResult<User> {
        input.validate()?;

        let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE username = $1")
            .bind(&input.username)
            .fetch_one(&self.db)
            .await?;

        if existing > 0 {
            return Err(AppError::Conflict {
                resource: "username".to_string(),
                message: "Username already exists".to_string(),
                message_tr: "Bu kullanıcı adı zaten kayıtlı".to_string(),
            });
        }

        let password_hash = hash_password(&input.password)?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password_hash, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&input.username)
        .bind(&password_hash)
        .bind(input.role.as_str())
        .fetch_one(&self.db)
        .await?;

        tracing::info!(username = %row.username, role = %row.role, "User created");
        Ok(row.into())
    }

    /// Delete a user; the bootstrap admin account cannot be deleted
    pub async fn delete(&self, user_id: Uuid, protected_username: &str) -> AppResult<()> {
        let username = sqlx::query_scalar::<_, String>("SELECT username FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_string()))?;

        if username == protected_username {
            return Err(AppError::Conflict {
                resource: "user".to_string(),
                message: "The main admin account cannot be deleted".to_string(),
                message_tr: "Ana yönetici hesabı silinemez".to_string(),
            });
        }

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.db)
            .await?;

        tracing::info!(%username, "User deleted");
        Ok(())
    }
}
