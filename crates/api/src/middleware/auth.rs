//! Caller identity extractor for Axum handlers.
//!
//! Authentication happens upstream; the proxy in front of this service
//! forwards the verified user id in `x-user-id` and, optionally, a display
//! name in `x-user-name`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use platebook_core::error::CoreError;
use platebook_core::names::fallback_label;
use platebook_core::types::UserId;

use crate::error::AppError;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";

/// The calling user.
///
/// ```ignore
/// async fn my_handler(auth: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %auth.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    /// Display name supplied by the proxy, trimmed; `None` when absent or blank.
    pub display_name: Option<String>,
}

impl AuthUser {
    /// Name used when a profile has to be created for this caller.
    pub fn display_name_or_default(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| fallback_label(&self.user_id))
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {USER_ID_HEADER} header"
                )))
            })?;

        let user_id = raw_id.trim().parse::<UserId>().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Invalid {USER_ID_HEADER} header: expected a UUID"
            )))
        })?;

        let display_name = parts
            .headers
            .get(USER_NAME_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);

        Ok(AuthUser {
            user_id,
            display_name,
        })
    }
}
