pub mod auth;
pub mod catalog;
pub mod events;
pub mod officers;
pub mod reports;
