//! Persistence for users and tasks. These are the only types that issue SQL.

pub mod tasks;
pub mod users;

pub use tasks::TaskStore;
pub use users::UserStore;
