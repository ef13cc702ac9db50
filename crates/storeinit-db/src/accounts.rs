//! Database operations for `account_user`.

use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;

use crate::DbError;

/// A row from the `account_user` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    /// Encoded hash, `<algorithm>$<hash>`.
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full account state written on create or overwrite.
///
/// `first_name`/`last_name` of `None` insert an empty name and leave an
/// existing name untouched on update.
#[derive(Debug, Clone, Copy)]
pub struct AccountWrite<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}

/// Looks up a user by exact email.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn find_user_by_email(pool: &PgPool, email: &str) -> Result<Option<UserRow>, DbError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, password, first_name, last_name, \
                is_active, is_staff, is_superuser, date_joined, updated_at \
         FROM account_user \
         WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Inserts a new user and returns its `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails, including when the email
/// is already taken.
pub async fn insert_user(pool: &PgPool, account: &AccountWrite<'_>) -> Result<i64, DbError> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO account_user \
             (email, password, first_name, last_name, is_active, is_staff, is_superuser, \
              private_metadata, metadata) \
         VALUES ($1, $2, COALESCE($3, ''), COALESCE($4, ''), $5, $6, $7, $8::jsonb, $8::jsonb) \
         RETURNING id",
    )
    .bind(account.email)
    .bind(account.password_hash)
    .bind(account.first_name)
    .bind(account.last_name)
    .bind(account.is_active)
    .bind(account.is_staff)
    .bind(account.is_superuser)
    .bind(json!({}))
    .fetch_one(pool)
    .await?;
    Ok(id)
}

/// Overwrites a user's password and flags, and names when given.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no user has `user_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn update_user(
    pool: &PgPool,
    user_id: i64,
    account: &AccountWrite<'_>,
) -> Result<(), DbError> {
    let rows_affected = sqlx::query(
        "UPDATE account_user SET \
             password     = $2, \
             is_active    = $3, \
             is_staff     = $4, \
             is_superuser = $5, \
             first_name   = COALESCE($6, first_name), \
             last_name    = COALESCE($7, last_name), \
             updated_at   = NOW() \
         WHERE id = $1",
    )
    .bind(user_id)
    .bind(account.password_hash)
    .bind(account.is_active)
    .bind(account.is_staff)
    .bind(account.is_superuser)
    .bind(account.first_name)
    .bind(account.last_name)
    .execute(pool)
    .await?
    .rows_affected();

    if rows_affected == 0 {
        return Err(DbError::NotFound);
    }
    Ok(())
}
