use argon2::{
    Argon2, PasswordHasher,
    password_hash::{SaltString, rand_core::OsRng},
};
use uuid::Uuid;

use crate::{
    db::DbPool,
    entity::users::UserRole,
    error::{AppError, AppResult},
    models::User,
};

/// Fields accepted at registration. `is_staff`/`is_superuser` are
/// tri-state: `None` means "use the entry point's default".
#[derive(Debug, Default)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub position: Option<String>,
    pub social_id: Option<String>,
    pub role: Option<UserRole>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

/// Create a regular account. Flags left unset default to false; the
/// account starts inactive until the confirm-token flow activates it.
pub async fn create_user(pool: &DbPool, new: NewUser) -> AppResult<User> {
    let is_staff = new.is_staff.unwrap_or(false);
    let is_superuser = new.is_superuser.unwrap_or(false);
    insert_user(pool, new, is_staff, is_superuser).await
}

/// Create a superuser. Both flags default to true and an explicit false
/// is rejected.
pub async fn create_superuser(pool: &DbPool, new: NewUser) -> AppResult<User> {
    let (is_staff, is_superuser) = resolve_superuser_flags(new.is_staff, new.is_superuser)?;
    insert_user(pool, new, is_staff, is_superuser).await
}

async fn insert_user(
    pool: &DbPool,
    new: NewUser,
    is_staff: bool,
    is_superuser: bool,
) -> AppResult<User> {
    if new.email.trim().is_empty() {
        return Err(AppError::BadRequest("Email address is required".to_string()));
    }
    let email = normalize_email(&new.email);

    validate_username(&new.username)?;

    let exist: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;
    if exist.is_some() {
        return Err(AppError::BadRequest("Email is already taken".to_string()));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(new.password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let role = new.role.unwrap_or(UserRole::Buyer);
    let id = Uuid::new_v4();

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users
            (id, email, username, password_hash, first_name, last_name,
             company, "position", social_id, is_staff, is_superuser, role)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(email.as_str())
    .bind(new.username.as_str())
    .bind(password_hash)
    .bind(new.first_name.as_str())
    .bind(new.last_name.as_str())
    .bind(new.company.as_deref())
    .bind(new.position.as_deref())
    .bind(new.social_id.as_deref())
    .bind(is_staff)
    .bind(is_superuser)
    .bind(role.to_string())
    .fetch_one(pool)
    .await?;

    tracing::info!(user_id = %user.id, email = %user.email, "user created");
    Ok(user)
}

/// Lowercase the domain part of the address, leaving the local part as
/// the caller wrote it.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Usernames allow letters, digits and @/./+/-/_ only.
pub fn validate_username(username: &str) -> AppResult<()> {
    let ok = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if !ok {
        return Err(AppError::BadRequest(
            "Username may contain only letters, digits and @/./+/-/_".to_string(),
        ));
    }
    Ok(())
}

fn resolve_superuser_flags(
    is_staff: Option<bool>,
    is_superuser: Option<bool>,
) -> AppResult<(bool, bool)> {
    if is_staff == Some(false) {
        return Err(AppError::BadRequest(
            "Superuser must have is_staff=true".to_string(),
        ));
    }
    if is_superuser == Some(false) {
        return Err(AppError::BadRequest(
            "Superuser must have is_superuser=true".to_string(),
        ));
    }
    Ok((is_staff.unwrap_or(true), is_superuser.unwrap_or(true)))
}

#[cfg(test)]
mod tests {
    use super::{normalize_email, resolve_superuser_flags, validate_username};

    #[test]
    fn normalize_lowercases_domain_only() {
        assert_eq!(normalize_email("Jane.Doe@EXAMPLE.COM"), "Jane.Doe@example.com");
        assert_eq!(normalize_email("  user@Shop.Ru  "), "user@shop.ru");
    }

    #[test]
    fn normalize_leaves_bare_strings_alone() {
        assert_eq!(normalize_email("not-an-address"), "not-an-address");
    }

    #[test]
    fn username_charset_is_enforced() {
        assert!(validate_username("jane.doe+shop_1@x").is_ok());
        assert!(validate_username("").is_ok());
        assert!(validate_username("jane doe").is_err());
        assert!(validate_username("жанна").is_err());
    }

    #[test]
    fn superuser_flags_default_to_true() {
        assert_eq!(resolve_superuser_flags(None, None).unwrap(), (true, true));
        assert_eq!(
            resolve_superuser_flags(Some(true), None).unwrap(),
            (true, true)
        );
    }

    #[test]
    fn explicit_false_flags_are_rejected() {
        assert!(resolve_superuser_flags(Some(false), None).is_err());
        assert!(resolve_superuser_flags(None, Some(false)).is_err());
        assert!(resolve_superuser_flags(Some(false), Some(false)).is_err());
    }
}
