pub mod task;
pub mod user;

pub use task::{NewTask, PageWindow, Task, TaskInput, TaskQuery, TaskReplacement};
pub use user::{NewUser, Role, User};
