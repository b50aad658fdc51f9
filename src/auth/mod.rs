pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use validator::Validate;

pub use extractors::{AuthenticatedUser, MaybeAuthenticated};
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, JwtKeys};

/// Credentials sent to both `/auth/login` and `/auth/register`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct Credentials {
    /// Must not be empty.
    #[validate(length(min = 1, message = "Username must not be empty"))]
    pub username: String,
    pub password: String,
}

/// Response of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// Response of a successful registration.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
