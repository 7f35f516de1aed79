//! Row types and input DTOs.

pub mod dish;
pub mod place;
pub mod user;
