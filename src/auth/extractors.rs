use actix_web::dev::Payload;
use actix_web::{web, Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};

use crate::auth::{bearer_token, Claims, JwtKeys};
use crate::error::AppError;

/// The identity of the caller on routes protected by `AuthMiddleware`.
///
/// The middleware validates the JWT and stores its `Claims` in the request
/// extensions. If they are missing (the middleware did not run), extraction
/// fails with `AppError::Unauthorized`.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

impl AuthenticatedUser {
    pub fn user_id(&self) -> i64 {
        self.0.sub
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>().cloned() {
            Some(claims) => ready(Ok(AuthenticatedUser(claims))),
            None => {
                let err = AppError::Unauthorized("No user identifier in token".to_string());
                ready(Err(err.into()))
            }
        }
    }
}

/// The caller's identity on public routes, if a valid bearer token was sent.
///
/// A missing, malformed or expired token yields `None`, never an error.
/// Requires `web::Data<JwtKeys>` to be registered on the app.
#[derive(Debug, Clone)]
pub struct MaybeAuthenticated(pub Option<Claims>);

impl MaybeAuthenticated {
    pub fn is_admin(&self) -> bool {
        self.0.as_ref().map_or(false, Claims::is_admin)
    }
}

impl FromRequest for MaybeAuthenticated {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let keys = match req.app_data::<web::Data<JwtKeys>>() {
            Some(keys) => keys,
            None => {
                let err = AppError::InternalServerError("Token keys are not configured".to_string());
                return ready(Err(err.into()));
            }
        };

        let claims = bearer_token(req.headers()).and_then(|token| keys.verify_token(token).ok());
        ready(Ok(MaybeAuthenticated(claims)))
    }
}
