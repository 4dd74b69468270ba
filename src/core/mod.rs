//! Business logic, independent of the HTTP layer.

pub mod greeting;
