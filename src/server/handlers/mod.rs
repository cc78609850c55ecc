//! HTTP handlers for the server.

pub mod auth;
pub mod pdf;
