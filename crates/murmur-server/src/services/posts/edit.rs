use murmur_api_types::error::FormErrors;
use murmur_api_types::util::Sensitive;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::id::{GroupId, PostId};
use murmur_model::post::UpdatePost;
use murmur_model::{Group, Post};

use crate::extract::SessionUser;
use crate::services::util::check_post_text;
use crate::App;

#[derive(Debug)]
pub struct EditPost<'a> {
    pub id: Sensitive<PostId>,
    pub text: Sensitive<&'a str>,
    pub group: Option<i64>,
    pub image: Option<&'a str>,
}

#[derive(Debug)]
#[must_use]
pub enum EditPostOutcome {
    Updated(Post),
    /// The requester is not the post's author. Not an error: the
    /// original flow silently bounces them back to the post page.
    NotAuthor(PostId),
}

impl EditPost<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.posts.edit")]
    pub async fn perform(
        self,
        app: &App,
        session_user: &SessionUser,
    ) -> Result<EditPostOutcome, ApiError> {
        let mut conn = app.db_write().await?;

        let Some(post) = Post::find(&mut conn, *self.id.value()).await? else {
            let error =
                ApiError::new(ApiErrorCategory::NotFound).message("Could not find post specified");

            return Err(error);
        };

        if post.author_id != session_user.id {
            return Ok(EditPostOutcome::NotAuthor(post.id));
        }

        let mut errors = FormErrors::new();
        check_post_text(&mut errors, &self.text, app.config.post_max_characters);

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

        errors.into_result()?;

        let post = UpdatePost::builder()
            .id(post.id)
            .content(*self.text.value())
            .maybe_group_id(group.map(|group| group.id))
            .maybe_image(self.image)
            .build()
            .update(&mut conn)
            .await?;

        conn.commit().await?;

        Ok(EditPostOutcome::Updated(post))
    }
}

#[cfg(test)]
mod tests {
    use super::EditPostOutcome;
    use crate::test_utils;
    use murmur_api_types::util::Sensitive;
    use murmur_model::Post;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_not_let_a_non_author_edit() {
        test_utils::with_test_app(concat!(module_path!(), "::non_author"), |app| async move {
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

            let post = test_utils::posts::publish()
                .app(&app)
                .session(&alice)
                .text("alice's original words")
                .call()
                .await;

            let request = super::EditPost {
                id: Sensitive::new(post.id),
                text: Sensitive::new("bob was here"),
                group: None,
                image: None,
            };

            let outcome = request
                .perform(&app, &bob.session_user())
                .await
                .unwrap();

            assert!(matches!(outcome, EditPostOutcome::NotAuthor(id) if id == post.id));

            // and the post is untouched
            let mut conn = app.db_read().await.unwrap();
            let unchanged = Post::find(&mut conn, post.id).await.unwrap().unwrap();
            assert_eq!(unchanged.content, "alice's original words");
            assert_eq!(unchanged.updated, None);
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_let_the_author_edit() {
        test_utils::with_test_app(concat!(module_path!(), "::author"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let post = test_utils::posts::publish()
                .app(&app)
                .session(&alice)
                .text("first attempt")
                .call()
                .await;

            let request = super::EditPost {
                id: Sensitive::new(post.id),
                text: Sensitive::new("second attempt"),
                group: None,
                image: None,
            };

            let outcome = request
                .perform(&app, &alice.session_user())
                .await
                .unwrap();

            let EditPostOutcome::Updated(updated) = outcome else {
                panic!("expected the post to be updated");
            };

            assert_eq!(updated.content, "second attempt");
            assert!(updated.updated.is_some());
        })
        .await;
    }
}
