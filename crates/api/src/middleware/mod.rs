//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the calling user, as asserted by the upstream proxy.

pub mod auth;
