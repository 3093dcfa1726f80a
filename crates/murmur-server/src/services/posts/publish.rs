use murmur_api_types::error::FormErrors;
use murmur_api_types::util::Sensitive;
use murmur_error::ApiError;
use murmur_model::id::GroupId;
use murmur_model::post::InsertPost;
use murmur_model::{Group, Post};

use crate::extract::SessionUser;
use crate::services::util::check_post_text;
use crate::App;

#[derive(Debug)]
pub struct PublishPost<'a> {
    pub text: Sensitive<&'a str>,
    /// Id of the group the post should belong to.
    pub group: Option<i64>,
    pub image: Option<&'a str>,
}

#[derive(Debug)]
pub struct PublishPostResponse {
    pub post: Post,
}

impl PublishPost<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.posts.publish")]
    pub async fn perform(
        self,
        app: &App,
        session_user: &SessionUser,
    ) -> Result<PublishPostResponse, ApiError> {
        let mut errors = FormErrors::new();
        check_post_text(&mut errors, &self.text, app.config.post_max_characters);

        let mut conn = app.db_write().await?;

        let group = match self.group {
            Some(id) => {
                let group = Group::find(&mut conn, GroupId(id)).await?;
                if group.is_none() {
                    errors.add("group", "Select a valid choice");
                }
                group
            }
            None => None,
        };

        // nothing is persisted unless the whole form checks out
        errors.into_result()?;

        let post = InsertPost::builder()
            .author_id(session_user.id)
            .maybe_group_id(group.map(|group| group.id))
            .content(*self.text.value())
            .maybe_image(self.image)
            .build()
            .insert(&mut conn)
            .await?;

        conn.commit().await?;

        Ok(PublishPostResponse { post })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestResultExt};
    use assert_json_diff::assert_json_include;
    use murmur_api_types::util::Sensitive;
    use murmur_model::Post;
    use serde_json::json;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_reject_short_text_without_persisting() {
        test_utils::with_test_app(concat!(module_path!(), "::short"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let request = super::PublishPost {
                text: Sensitive::new("hi"),
                group: None,
                image: None,
            };

            let error = request
                .perform(&app, &alice.session_user())
                .await
                .expect_error_json();

            assert_json_include!(
                actual: error,
                expected: json!({
                    "code": "invalid_form",
                    "errors": { "text": ["Post is too short"] },
                }),
            );

            let mut conn = app.db_read().await.unwrap();
            let count = Post::count_by_author(&mut conn, alice.user.id).await.unwrap();
            assert_eq!(count, 0);
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_reject_an_unknown_group() {
        test_utils::with_test_app(concat!(module_path!(), "::group"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let request = super::PublishPost {
                text: Sensitive::new("a perfectly fine post"),
                group: Some(2_000_000),
                image: None,
            };

            let error = request
                .perform(&app, &alice.session_user())
                .await
                .expect_error_json();

            assert_json_include!(
                actual: error,
                expected: json!({
                    "code": "invalid_form",
                    "errors": { "group": ["Select a valid choice"] },
                }),
            );
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_publish_a_post() {
        test_utils::with_test_app(concat!(module_path!(), "::publish"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let group = test_utils::groups::create()
                .app(&app)
                .title("Rustaceans")
                .slug("rustaceans")
                .call()
                .await;

            let request = super::PublishPost {
                text: Sensitive::new("crabs all the way down"),
                group: Some(group.id.0),
                image: None,
            };

            let response = request.perform(&app, &alice.session_user()).await.unwrap();
            assert_eq!(response.post.author_id, alice.user.id);
            assert_eq!(response.post.group_id, Some(group.id));
            assert_eq!(response.post.content, "crabs all the way down");
        })
        .await;
    }
}
