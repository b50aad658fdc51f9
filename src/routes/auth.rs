use crate::{
    auth::{Credentials, MaybeAuthenticated, MessageResponse, TokenResponse},
    error::AppError,
    services::AuthService,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new user
///
/// The first user ever registered becomes the administrator. Afterwards only
/// a caller presenting an administrator's bearer token may register users.
///
/// ## Responses:
/// - `200 OK`: `{"message": ...}` saying whether the first admin was bootstrapped.
/// - `400 Bad Request`: The username is taken or the input is empty.
/// - `401 Unauthorized`: Users exist and the caller is not an administrator.
#[post("/register")]
pub async fn register(
    auth: web::Data<AuthService>,
    caller: MaybeAuthenticated,
    register_data: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;

    let outcome = auth
        .register(
            &register_data.username,
            &register_data.password,
            caller.is_admin(),
        )
        .await?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: outcome.message().to_string(),
    }))
}

/// Login user
///
/// Returns a signed bearer token valid for seven days.
#[post("/login")]
pub async fn login(
    auth: web::Data<AuthService>,
    login_data: web::Json<Credentials>,
) -> Result<impl Responder, AppError> {
    let token = auth.login(&login_data.username, &login_data.password).await?;
    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
