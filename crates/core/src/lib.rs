//! Platebook domain logic.
//!
//! Pure types and functions shared by the store and the HTTP layer. Nothing
//! in this crate performs I/O; every snapshot is passed in by the caller.

pub mod dining;
pub mod error;
pub mod money;
pub mod names;
pub mod normalize;
pub mod ranking;
pub mod stats;
pub mod types;
