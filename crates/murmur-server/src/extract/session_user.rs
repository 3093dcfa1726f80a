use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::Uri;
use axum::response::{IntoResponse, Redirect, Response};
use murmur_db::pool::PgConnection;
use murmur_error::ext::ErrorResultExt;
use murmur_error::{ApiErrorCategory, Error};
use murmur_model::id::UserId;
use murmur_model::User;
use std::convert::Infallible;
use std::ops::Deref;
use thiserror::Error as ThisError;

use crate::App;

/// The user a request is authenticated as, placed into the request
/// extensions by the auth middleware.
///
/// Extracting it on a route where the middleware found no valid token
/// rejects the request with a redirect to the login page, carrying the
/// original URI in the `next` query parameter.
#[derive(Clone)]
pub struct SessionUser {
    pub user: User,
}

impl SessionUser {
    #[must_use]
    pub fn into_inner(self) -> User {
        self.user
    }
}

impl Deref for SessionUser {
    type Target = User;

    fn deref(&self) -> &Self::Target {
        &self.user
    }
}

#[derive(Debug, ThisError)]
#[error("could not make a session user")]
pub(crate) struct GetSessionUserError;

impl SessionUser {
    pub(crate) async fn from_db(
        conn: &mut PgConnection,
        id: UserId,
    ) -> murmur_error::Result<Self, GetSessionUserError> {
        let user = User::find(conn, id)
            .await
            .change_context(GetSessionUserError)?;

        if let Some(user) = user {
            Ok(Self { user })
        } else {
            let error = Error::new(ApiErrorCategory::AccessDenied, GetSessionUserError)
                .attach_printable("specified user does not exist");

            Err(error)
        }
    }
}

impl std::fmt::Debug for SessionUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // for diagnostic purposes
        f.debug_struct("SessionUser")
            .field("id", &self.user.id)
            .finish_non_exhaustive()
    }
}

#[axum::async_trait]
impl FromRequestParts<App> for SessionUser {
    type Rejection = Response;

    #[tracing::instrument(skip_all, name = "extractors.session_user")]
    async fn from_request_parts(parts: &mut Parts, _app: &App) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<SessionUser>() {
            Some(identity) => Ok(identity.clone()),
            None => Err(login_redirect(&parts.uri).into_response()),
        }
    }
}

/// Like [`SessionUser`] but never rejects; routes that only *report* on
/// the viewing user (the profile page's `following` flag) use this.
pub struct MaybeSessionUser(pub Option<SessionUser>);

#[axum::async_trait]
impl FromRequestParts<App> for MaybeSessionUser {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _app: &App) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<SessionUser>().cloned()))
    }
}

/// Where an unauthenticated request to a protected route is bounced:
/// the login page, with the original URI preserved in `next`. The
/// original request itself is discarded.
#[must_use]
pub fn login_redirect(next: &Uri) -> Redirect {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("next", &next.to_string())
        .finish();

    Redirect::to(&format!("/auth/login/?{query}"))
}

#[cfg(test)]
mod tests {
    use super::login_redirect;
    use axum::http::{header, Uri};
    use axum::response::IntoResponse;

    fn location_of(uri: &str) -> String {
        let uri = uri.parse::<Uri>().unwrap();
        let response = login_redirect(&uri).into_response();
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn should_preserve_the_original_uri() {
        assert_eq!(location_of("/create/"), "/auth/login/?next=%2Fcreate%2F");
        assert_eq!(
            location_of("/follow/?page=2"),
            "/auth/login/?next=%2Ffollow%2F%3Fpage%3D2",
        );
    }
}
