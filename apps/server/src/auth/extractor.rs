//! Actix-web extractor for staff bearer tokens.

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, web};
use std::future::{Ready, ready};
use tracing::warn;
use uuid::Uuid;

use super::TokenVerifier;
use crate::config::AUTHORIZATION_HEADER;
use crate::error::{AppError, AppResult};
use crate::models::PermissionLevel;

/// Authenticated staff caller.
///
/// ```ignore
/// async fn handler(auth: StaffAuth) -> AppResult<HttpResponse> {
///     auth.require(PermissionLevel::Engineer)?;
///     // ...
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct StaffAuth {
    pub staff_id: Uuid,
    pub level: PermissionLevel,
}

impl StaffAuth {
    /// Reject callers below `required`. Higher levels include lower ones.
    pub fn require(&self, required: PermissionLevel) -> AppResult<()> {
        if self.level.satisfies(required) {
            Ok(())
        } else {
            warn!(
                staff_id = %self.staff_id,
                level = %self.level,
                required = %required,
                "Permission denied"
            );
            Err(AppError::Forbidden(format!(
                "This action requires {} permission",
                required
            )))
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequest for StaffAuth {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verifier = match req.app_data::<web::Data<TokenVerifier>>() {
            Some(verifier) => verifier,
            None => {
                return ready(Err(AppError::Unauthorized(
                    "Internal configuration error".to_string(),
                )));
            }
        };

        let token = match bearer_token(req) {
            Some(token) => token,
            None => {
                return ready(Err(AppError::Unauthorized(
                    "Missing bearer token. Provide an Authorization: Bearer header.".to_string(),
                )));
            }
        };

        ready(verifier.verify(token).map(|claims| StaffAuth {
            staff_id: claims.sub,
            level: claims.level,
        }))
    }
}
