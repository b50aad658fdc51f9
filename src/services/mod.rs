pub mod auth;
pub mod tasks;

pub use auth::{AuthService, Registration};
pub use tasks::TaskService;
