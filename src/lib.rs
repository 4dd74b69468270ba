//! A web service that greets people by name.

pub mod api;
pub mod app;
pub mod core;
pub mod infra;
