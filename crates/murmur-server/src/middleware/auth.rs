use axum::extract::{FromRequestParts, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use murmur_error::ext::ErrorResultExt;
use murmur_error::{ApiErrorCategory, Result};
use murmur_model::id::UserId;
use tracing::debug;

use crate::auth::jwt::LoginClaims;
use crate::extract::SessionUser;
use crate::App;

#[doc(hidden)]
#[derive(FromRequestParts)]
pub struct Metadata {
    auth_header: Option<TypedHeader<Authorization<Bearer>>>,
}

/// Resolves a bearer token into a [`SessionUser`] request extension.
///
/// Requests without a token, or with a token that is expired or points
/// at a deleted user, pass through as anonymous; route extractors
/// decide what anonymous means for them.
#[tracing::instrument(skip_all, name = "middleware.auth")]
pub async fn catch_token(
    metadata: Metadata,
    State(app): State<App>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(header) = metadata.auth_header {
        match resolve_session_user(&app, header.token()).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(user);
            }
            Ok(None) => {}
            Err(error) => return error.into_api_error().into_response(),
        }
    }
    next.run(request).await
}

async fn resolve_session_user(app: &App, token: &str) -> Result<Option<SessionUser>> {
    let Ok(claims) = LoginClaims::decode(token, app.config.auth.jwt_secret.value()) else {
        // a stale or garbage token means an anonymous visitor, not an error
        debug!("discarding invalid bearer token");
        return Ok(None);
    };

    let mut conn = app.db_read().await.erase_context()?;
    match SessionUser::from_db(&mut conn, UserId(claims.sub)).await {
        Ok(user) => Ok(Some(user)),
        // the token's user is gone, carry on anonymously
        Err(error) if matches!(error.get_category(), ApiErrorCategory::AccessDenied) => {
            debug!("discarding bearer token of a deleted user");
            Ok(None)
        }
        Err(error) => Err(error.erase_context()),
    }
}
