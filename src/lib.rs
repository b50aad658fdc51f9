#![doc = "The `zadania` library crate."]
#![doc = ""]
#![doc = "A minimal authenticated task-list backend: users register and log in, receive a"]
#![doc = "signed bearer token, and manage their own tasks. The binary (`main.rs`) loads the"]
#![doc = "configuration, opens the SQLite pool and serves the routes defined here."]

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

pub use crate::error::AppError;
pub use crate::state::AppState;
