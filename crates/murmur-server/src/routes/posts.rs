use axum::extract::{OriginalUri, Path, Query};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Redirect, Response};
use bytes::Bytes;
use murmur_api_types::pagination::PageParams;
use murmur_api_types::routes::posts::{CreateComment, EditPost, PostDetailPayload, PublishPost};
use murmur_api_types::util::Sensitive;
use murmur_error::ext::ResultExt;
use murmur_error::ApiError;
use murmur_model::id::PostId;

use super::{build_comment_data, build_paged_posts, build_post_data};
use crate::extract::{Json, SessionUser};
use crate::services;
use crate::services::posts::{CreateCommentOutcome, EditPostOutcome};
use crate::App;

/// Serves `GET /`, the home feed.
///
/// The rendered page is cached per URL (query string included) and
/// shared across all visitors; inside the window the response is served
/// from the stored bytes without touching the database.
pub async fn home(
    app: App,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<PageParams>,
) -> Result<Response, ApiError> {
    let key = uri.to_string();
    if let Some(cached) = app.page_cache.get(&key).await {
        return Ok(page_response(cached.body));
    }

    let page = services::posts::HomeFeed { page: params.page }
        .perform(&app)
        .await?;

    let body = serde_json::to_vec(&build_paged_posts(page)).erase_context()?;
    let body = Bytes::from(body);

    app.page_cache.insert(key, body.clone()).await;
    Ok(page_response(body))
}

fn page_response(body: Bytes) -> Response {
    (
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        )],
        body,
    )
        .into_response()
}

/// Serves `GET /follow/`, posts of the authors the session user follows.
pub async fn following_feed(
    app: App,
    session_user: SessionUser,
    Query(params): Query<PageParams>,
) -> Result<Response, ApiError> {
    let page = services::posts::FollowingFeed { page: params.page }
        .perform(&app, &session_user)
        .await?;

    Ok(Json(build_paged_posts(page)).into_response())
}

/// Serves `GET /posts/{id}/`, one post with its comments.
pub async fn detail(app: App, Path(id): Path<i64>) -> Result<Response, ApiError> {
    let response = services::posts::GetPostDetail {
        id: Sensitive::new(PostId(id)),
    }
    .perform(&app)
    .await?;

    let payload = PostDetailPayload {
        post: build_post_data(response.post),
        author_post_count: response.author_post_count,
        comments: response
            .comments
            .into_iter()
            .map(build_comment_data)
            .collect(),
    };

    Ok(Json(payload).into_response())
}

/// Serves `POST /create/`: publish a post, then off to the author's profile.
pub async fn create(
    app: App,
    session_user: SessionUser,
    Json(data): Json<PublishPost>,
) -> Result<Response, ApiError> {
    let request = services::posts::PublishPost {
        text: Sensitive::new(data.text.as_str()),
        group: data.group,
        image: data.image.as_deref(),
    };
    request.perform(&app, &session_user).await?;

    Ok(Redirect::to(&format!("/profile/{}/", session_user.name)).into_response())
}

/// Serves `POST /posts/{id}/edit/`: author-only edit; anyone else is bounced
/// back to the post page unchanged.
pub async fn edit(
    app: App,
    session_user: SessionUser,
    Path(id): Path<i64>,
    Json(data): Json<EditPost>,
) -> Result<Response, ApiError> {
    let request = services::posts::EditPost {
        id: Sensitive::new(PostId(id)),
        text: Sensitive::new(data.text.as_str()),
        group: data.group,
        image: data.image.as_deref(),
    };

    let post_id = match request.perform(&app, &session_user).await? {
        EditPostOutcome::Updated(post) => post.id,
        EditPostOutcome::NotAuthor(post_id) => post_id,
    };

    Ok(Redirect::to(&format!("/posts/{post_id}/")).into_response())
}

/// Serves `POST /posts/{id}/comment/`: add a comment, then back to the post.
pub async fn comment(
    app: App,
    session_user: SessionUser,
    Path(id): Path<i64>,
    Json(data): Json<CreateComment>,
) -> Result<Response, ApiError> {
    let request = services::posts::CreateComment {
        post_id: Sensitive::new(PostId(id)),
        text: Sensitive::new(data.text.as_str()),
    };

    let post_id = match request.perform(&app, &session_user).await? {
        CreateCommentOutcome::Created(comment) => comment.post_id,
        CreateCommentOutcome::SkippedEmpty(post_id) => post_id,
    };

    Ok(Redirect::to(&format!("/posts/{post_id}/")).into_response())
}

#[cfg(test)]
mod tests {
    use crate::build_axum_router;
    use crate::test_utils;
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use serde_json::json;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_serve_the_home_feed_from_cache_within_the_window() {
        test_utils::with_test_app(concat!(module_path!(), "::cache"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let server = TestServer::new(build_axum_router(app.clone())).unwrap();
            let before = server.get("/").await.text();

            test_utils::posts::publish()
                .app(&app)
                .session(&alice)
                .text("posted inside the cache window")
                .call()
                .await;

            // within the window the new post stays invisible, byte for byte
            let cached = server.get("/").await.text();
            assert_eq!(before, cached);

            // a manual clear makes it show up
            app.page_cache.clear();
            let fresh = server.get("/").await.text();
            assert_ne!(before, fresh);
            assert!(fresh.contains("posted inside the cache window"));
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_redirect_to_the_profile_after_creating() {
        test_utils::with_test_app(concat!(module_path!(), "::create"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let server = TestServer::new(build_axum_router(app.clone())).unwrap();
            let bearer = HeaderValue::from_str(&format!("Bearer {}", alice.token)).unwrap();
            let response = server
                .post("/create/")
                .add_header(header::AUTHORIZATION, bearer)
                .json(&json!({ "text": "hello from the router" }))
                .await;

            response.assert_status(StatusCode::SEE_OTHER);
            let headers = response.headers();
            assert_eq!(headers.get(header::LOCATION).unwrap(), "/profile/alice/");
        })
        .await;
    }
}
