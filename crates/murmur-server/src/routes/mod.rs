use axum::routing::{get, post};
use axum::Router;
use murmur_api_types::comment::CommentData;
use murmur_api_types::pagination::Paged;
use murmur_api_types::post::{PostData, PostGroup};
use murmur_api_types::user::UserData;
use murmur_api_types::{Error as ApiError, ErrorCategory as ApiErrorCategory};
use murmur_model::comment::CommentView;
use murmur_model::pagination::Page;
use murmur_model::post::PostView;
use murmur_model::user::UserView;
use murmur_model::User;

use crate::App;

mod auth;
mod groups;
mod posts;
mod users;

/// Builds the Murmur router, auth middleware included.
pub fn build_axum_router(app: App) -> Router {
    Router::new()
        .route("/", get(posts::home))
        .route("/group/:slug/", get(groups::feed))
        .route("/profile/:username/", get(users::profile))
        .route("/posts/:id/", get(posts::detail))
        .route("/create/", post(posts::create))
        .route("/posts/:id/edit/", post(posts::edit))
        .route("/posts/:id/comment/", post(posts::comment))
        .route("/follow/", get(posts::following_feed))
        .route("/profile/:username/follow/", get(users::follow))
        .route("/profile/:username/unfollow/", get(users::unfollow))
        .route("/auth/signup/", post(auth::signup))
        .route("/auth/login/", post(auth::login))
        .fallback(page_not_found)
        .layer(axum::middleware::from_fn_with_state(
            app.clone(),
            crate::middleware::auth::catch_token,
        ))
        .with_state(app)
}

/// Every route that matches nothing lands here.
async fn page_not_found() -> ApiError {
    ApiError::new(ApiErrorCategory::NotFound).message("Page not found")
}

pub(crate) fn build_user_data(view: &UserView) -> UserData {
    UserData {
        id: view.id.0,
        name: view.name.clone(),
        display_name: view.display_name.clone(),
    }
}

pub(crate) fn build_user_data_from_user(user: &User) -> UserData {
    UserData {
        id: user.id.0,
        name: user.name.clone(),
        display_name: user.display_name.clone(),
    }
}

pub(crate) fn build_post_data(view: PostView) -> PostData {
    PostData {
        id: view.post.id.0,
        created: view.post.created,
        updated: view.post.updated,
        text: view.post.content,
        image: view.post.image,
        author: build_user_data(&view.author),
        group: view.group.map(|group| PostGroup {
            title: group.title,
            slug: group.slug,
        }),
    }
}

pub(crate) fn build_comment_data(view: CommentView) -> CommentData {
    CommentData {
        id: view.comment.id.0,
        created: view.comment.created,
        text: view.comment.content,
        author: build_user_data(&view.author),
    }
}

pub(crate) fn build_paged_posts(page: Page<PostView>) -> Paged<PostData> {
    let page = page.map(build_post_data);
    Paged {
        items: page.items,
        page: page.number,
        total_pages: page.total_pages,
        total_items: page.total_items,
    }
}

#[cfg(test)]
mod tests {
    use crate::{build_axum_router, App};
    use axum::http::{header, StatusCode};
    use axum_test::{TestResponse, TestServer};
    use serde_json::json;

    fn test_server() -> TestServer {
        let app = App::new(murmur_config::Server::for_tests()).unwrap();
        TestServer::new(build_axum_router(app)).unwrap()
    }

    fn location_of(response: &TestResponse) -> String {
        response
            .headers()
            .get(header::LOCATION)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn should_serve_the_custom_not_found_page() {
        let server = test_server();
        let response = server.get("/unexisting_page/").await;

        response.assert_status(StatusCode::NOT_FOUND);
        response.assert_json(&json!({
            "code": "not_found",
            "message": "Page not found",
        }));
    }

    #[tokio::test]
    async fn should_redirect_anonymous_visitors_to_login() {
        let server = test_server();

        let response = server.post("/create/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/auth/login/?next=%2Fcreate%2F");

        let response = server.get("/follow/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(location_of(&response), "/auth/login/?next=%2Ffollow%2F");

        let response = server.get("/profile/alice/follow/").await;
        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            location_of(&response),
            "/auth/login/?next=%2Fprofile%2Falice%2Ffollow%2F",
        );
    }
}
