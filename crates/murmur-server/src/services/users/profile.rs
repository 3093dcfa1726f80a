use murmur_api_types::util::Sensitive;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::pagination::{Page, Paginator};
use murmur_model::post::PostView;
use murmur_model::user::Follower;
use murmur_model::{Post, User};

use crate::extract::SessionUser;
use crate::App;

/// Assembles a profile page: the author, their posts and whether the
/// viewing user currently follows them.
#[derive(Debug)]
pub struct GetProfile<'a> {
    pub username: Sensitive<&'a str>,
    pub page: Option<u64>,
}

#[derive(Debug)]
pub struct GetProfileResponse {
    pub author: User,
    /// Whether the *viewing* user follows this author. Always `false`
    /// for anonymous visitors.
    pub following: bool,
    pub post_count: u64,
    pub posts: Page<PostView>,
}

impl GetProfile<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.users.profile")]
    pub async fn perform(
        self,
        app: &App,
        viewer: Option<&SessionUser>,
    ) -> Result<GetProfileResponse, ApiError> {
        let mut conn = app.db_read().await?;

        let Some(author) = User::find_by_name(&mut conn, &self.username).await? else {
            let error =
                ApiError::new(ApiErrorCategory::NotFound).message("Could not find user specified");

            return Err(error);
        };

        let following = match viewer {
            Some(viewer) => Follower::get(&mut conn, viewer.id, author.id)
                .await?
                .is_some(),
            None => false,
        };

        let post_count = Post::count_by_author(&mut conn, author.id).await?;
        let paginator = Paginator::new(post_count, app.config.posts_per_page);
        let number = paginator.clamp(self.page);

        let items = PostView::list_by_author(
            &mut conn,
            author.id,
            paginator.offset(number),
            paginator.per_page(),
        )
        .await?;

        Ok(GetProfileResponse {
            author,
            following,
            post_count,
            posts: Page {
                items,
                number,
                total_pages: paginator.total_pages(),
                total_items: post_count,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestResultExt};
    use assert_json_diff::assert_json_include;
    use murmur_api_types::util::Sensitive;
    use serde_json::json;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_reject_an_unknown_username() {
        test_utils::with_test_app(concat!(module_path!(), "::unknown"), |app| async move {
            let request = super::GetProfile {
                username: Sensitive::new("nobody"),
                page: None,
            };

            let error = request.perform(&app, None).await.expect_error_json();
            assert_json_include!(actual: error, expected: json!({ "code": "not_found" }));
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_report_the_following_flag_per_viewer() {
        test_utils::with_test_app(concat!(module_path!(), "::following"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;
            let bob = test_utils::users::start_session()
                .app(&app)
                .name("bob")
                .call()
                .await;

            test_utils::users::follow(&app, &alice, "bob").await;

            // alice follows bob
            let request = super::GetProfile {
                username: Sensitive::new("bob"),
                page: None,
            };
            let response = request
                .perform(&app, Some(&alice.session_user()))
                .await
                .unwrap();
            assert!(response.following);

            // bob does not follow alice
            let request = super::GetProfile {
                username: Sensitive::new("alice"),
                page: None,
            };
            let response = request
                .perform(&app, Some(&bob.session_user()))
                .await
                .unwrap();
            assert!(!response.following);

            // anonymous visitors never follow anyone
            let request = super::GetProfile {
                username: Sensitive::new("bob"),
                page: None,
            };
            let response = request.perform(&app, None).await.unwrap();
            assert!(!response.following);
        })
        .await;
    }
}
