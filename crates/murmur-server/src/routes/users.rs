use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Redirect, Response};
use murmur_api_types::pagination::PageParams;
use murmur_api_types::routes::users::ProfilePayload;
use murmur_api_types::util::Sensitive;
use murmur_error::ApiError;

use super::{build_paged_posts, build_user_data_from_user};
use crate::extract::{Json, MaybeSessionUser, SessionUser};
use crate::services;
use crate::App;

/// Serves `GET /profile/{username}/`: an author's posts, and whether the
/// viewing user follows them.
pub async fn profile(
    app: App,
    viewer: MaybeSessionUser,
    Path(username): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Response, ApiError> {
    let response = services::users::GetProfile {
        username: Sensitive::new(username.as_str()),
        page: params.page,
    }
    .perform(&app, viewer.0.as_ref())
    .await?;

    let payload = ProfilePayload {
        author: build_user_data_from_user(&response.author),
        following: response.following,
        post_count: response.post_count,
        posts: build_paged_posts(response.posts),
    };

    Ok(Json(payload).into_response())
}

/// Serves `GET /profile/{username}/follow/`: subscribe, then back to the
/// profile whatever happened.
pub async fn follow(
    app: App,
    session_user: SessionUser,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let request = services::users::FollowUser {
        username: Sensitive::new(username.as_str()),
    };
    let author = request.perform(&app, &session_user).await?;

    Ok(Redirect::to(&format!("/profile/{}/", author.name)).into_response())
}

/// Serves `GET /profile/{username}/unfollow/`: unsubscribe, then back to the
/// profile whatever happened.
pub async fn unfollow(
    app: App,
    session_user: SessionUser,
    Path(username): Path<String>,
) -> Result<Response, ApiError> {
    let request = services::users::UnfollowUser {
        username: Sensitive::new(username.as_str()),
    };
    let author = request.perform(&app, &session_user).await?;

    Ok(Redirect::to(&format!("/profile/{}/", author.name)).into_response())
}
