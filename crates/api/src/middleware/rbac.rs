//! Role-based access control extractors.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use promptsmith_core::error::CoreError;
use promptsmith_core::roles::ROLE_SERVICE;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `service_role` role. Rejects with 403 Forbidden otherwise.
///
/// Used by write surfaces owned by trusted backends, such as the billing
/// sync.
///
/// ```ignore
/// async fn billing_only(RequireService(svc): RequireService) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireService(pub AuthUser);

impl FromRequestParts<AppState> for RequireService {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if user.role != ROLE_SERVICE {
            return Err(AppError::Core(CoreError::Forbidden(
                "Service role required".into(),
            )));
        }
        Ok(RequireService(user))
    }
}
