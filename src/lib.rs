#![doc = "The `coursedesk` library crate."]
#![doc = ""]
#![doc = "Academic-period arithmetic, weekly course-slot classification, token"]
#![doc = "revocation, authentication and the HTTP routes that expose them. The"]
#![doc = "binary (`main.rs`) wires these into an Actix Web server."]

pub mod auth;
pub mod blacklist;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod schedule;

pub use crate::error::AppError;
