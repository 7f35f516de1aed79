//! Request handlers.
//!
//! Handlers validate input, delegate to the [`DiningStore`] in
//! [`AppState`](crate::state::AppState) and the pure functions of
//! `platebook_core`, and map errors via [`AppError`](crate::error::AppError).
//!
//! [`DiningStore`]: platebook_db::store::DiningStore

pub mod dishes;
pub mod places;
pub mod rankings;
pub mod users;
