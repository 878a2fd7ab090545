use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, warn};

use crate::{
    auth::{
        dto::{present, LoginRequest, PublicUser, RegisterRequest},
        jwt::JwtKeys,
        password::{hash_password, verify_dummy, verify_password},
        repo::{CreateUserError, UserStore},
    },
    error::{AppError, AppResult},
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub async fn register(users: &dyn UserStore, req: &RegisterRequest) -> AppResult<PublicUser> {
    let (Some(username), Some(email), Some(password)) = (
        present(&req.username),
        present(&req.email),
        present(&req.password),
    ) else {
        return Err(AppError::Validation("All fields required".into()));
    };

    if !is_valid_email(email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }

    let existing = users
        .find_by_username_or_email(username, email)
        .await
        .map_err(AppError::server("Failed to register user"))?;
    if existing.is_some() {
        warn!(username = %username, email = %email, "username or email already taken");
        return Err(AppError::Conflict("Username or email already exists".into()));
    }

    let hash = hash_password(password).map_err(AppError::server("Failed to register user"))?;

    let user = match users.create(username, email, &hash).await {
        Ok(u) => u,
        Err(CreateUserError::Duplicate) => {
            warn!(username = %username, email = %email, "duplicate insert raced pre-check");
            return Err(AppError::Conflict("Username or email already exists".into()));
        }
        Err(CreateUserError::Other(e)) => {
            return Err(AppError::server("Failed to register user")(e));
        }
    };

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok(PublicUser {
        id: user.id,
        username: user.username,
        email: user.email,
    })
}

/// Unknown email and wrong password fail identically, each after one hash verification.
pub async fn login(users: &dyn UserStore, keys: &JwtKeys, req: &LoginRequest) -> AppResult<String> {
    let (Some(email), Some(password)) = (present(&req.email), present(&req.password)) else {
        return Err(AppError::Validation("All fields required".into()));
    };

    let user = users
        .find_by_email(email)
        .await
        .map_err(AppError::server("Failed to login"))?;

    let Some(user) = user else {
        verify_dummy(password);
        warn!(email = %email, "login unknown email");
        return Err(AppError::InvalidCredentials(INVALID_CREDENTIALS.into()));
    };

    let ok = verify_password(password, &user.password_hash)
        .map_err(AppError::server("Failed to login"))?;
    if !ok {
        warn!(user_id = %user.id, "login invalid password");
        return Err(AppError::InvalidCredentials(INVALID_CREDENTIALS.into()));
    }

    let token = keys
        .sign(user.id, &user.username)
        .map_err(AppError::server("Failed to login"))?;

    info!(user_id = %user.id, "user logged in");
    Ok(token)
}
