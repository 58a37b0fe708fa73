//! Core module - fundamental types and utilities

pub mod auth;
pub mod config;
pub mod entity;
pub mod identity;
pub mod project;

pub use auth::{ActionGate, OpenGate};
pub use config::Config;
pub use entity::{round2, Entity};
pub use identity::{EntityId, EntityPrefix, IdParseError};
pub use project::{Project, ProjectError};
