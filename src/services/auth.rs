use log::{info, warn};

use crate::{
    auth::{hash_password, verify_password, JwtKeys},
    error::AppError,
    models::{NewUser, Role},
    store::UserStore,
};

/// Outcome of a successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// The store was empty and the new user became the administrator.
    BootstrappedAdmin,
    /// An administrator registered an ordinary user.
    UserRegistered,
}

impl Registration {
    pub fn message(&self) -> &'static str {
        match self {
            Registration::BootstrappedAdmin => {
                "The user store was empty. Registered the first administrator."
            }
            Registration::UserRegistered => "Registered a new user.",
        }
    }
}

/// Registration and login.
#[derive(Clone)]
pub struct AuthService {
    users: UserStore,
    keys: JwtKeys,
}

impl AuthService {
    pub fn new(users: UserStore, keys: JwtKeys) -> Self {
        Self { users, keys }
    }

    /// Registers a user.
    ///
    /// Fails with `Conflict` if the name is taken and with `Unauthorized` if
    /// users already exist and the caller is not an authenticated admin.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        caller_is_admin: bool,
    ) -> Result<Registration, AppError> {
        if self.users.exists(username).await? {
            return Err(AppError::Conflict(format!(
                "A user named '{}' already exists",
                username
            )));
        }

        if self.users.count_all().await? > 0 && !caller_is_admin {
            warn!("Rejected registration of '{}' by a non-admin caller", username);
            return Err(only_admin_may_register());
        }

        let new_user = NewUser {
            username: username.to_string(),
            password_hash: hash_password(password)?,
        };

        // The store re-checks the emptiness condition atomically; losing a
        // race for the first registration lands here as `None`.
        let user = match self.users.insert(&new_user, caller_is_admin).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                warn!("Registration of '{}' lost the bootstrap race", username);
                return Err(only_admin_may_register());
            }
            Err(AppError::Conflict(_)) => {
                return Err(AppError::Conflict(format!(
                    "A user named '{}' already exists",
                    username
                )))
            }
            Err(e) => return Err(e),
        };

        match user.role {
            Role::Admin => {
                info!("Bootstrapped '{}' (id {}) as the first administrator", user.username, user.id);
                Ok(Registration::BootstrappedAdmin)
            }
            Role::User => {
                info!("Registered user '{}' (id {})", user.username, user.id);
                Ok(Registration::UserRegistered)
            }
        }
    }

    /// Checks the credentials and issues a signed token.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!("Login attempt for unknown user '{}'", username);
                return Err(invalid_credentials());
            }
        };

        if !verify_password(password, &user.password_hash)? {
            warn!("Failed login for '{}'", username);
            return Err(invalid_credentials());
        }

        self.keys.generate_token(user.id, &user.username, user.role)
    }
}

fn invalid_credentials() -> AppError {
    AppError::Unauthorized("Invalid username or password".into())
}

fn only_admin_may_register() -> AppError {
    AppError::Unauthorized("Only an administrator can register further users".into())
}
