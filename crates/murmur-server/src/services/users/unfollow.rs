use murmur_api_types::util::Sensitive;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::user::Follower;
use murmur_model::User;

use crate::extract::SessionUser;
use crate::App;

/// Removes the session user's subscription to an author.
///
/// Unfollowing someone who was never followed is a no-op; the caller
/// redirects to the author's profile regardless of outcome.
#[derive(Debug)]
pub struct UnfollowUser<'a> {
    pub username: Sensitive<&'a str>,
}

impl UnfollowUser<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.users.profile.unfollow")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<User, ApiError> {
        let mut conn = app.db_write().await?;

        let Some(target) = User::find_by_name(&mut conn, &self.username).await? else {
            let error =
                ApiError::new(ApiErrorCategory::NotFound).message("Could not find user specified");

            return Err(error);
        };

        Follower::unfollow(&mut conn, session_user.id, target.id).await?;
        conn.commit().await?;

        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;
    use murmur_api_types::util::Sensitive;
    use murmur_model::user::Follower;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_remove_the_follow_pair() {
        test_utils::with_test_app(concat!(module_path!(), "::unfollow"), |app| async move {
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

            let request = super::UnfollowUser {
                username: Sensitive::new("bob"),
            };
            request.perform(&app, &alice.session_user()).await.unwrap();

            let mut conn = app.db_read().await.unwrap();
            let pair = Follower::get(&mut conn, alice.user.id, bob.user.id)
                .await
                .unwrap();
            assert!(pair.is_none());
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_be_a_noop_when_not_following() {
        test_utils::with_test_app(concat!(module_path!(), "::noop"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;
            test_utils::users::start_session()
                .app(&app)
                .name("bob")
                .call()
                .await;

            let request = super::UnfollowUser {
                username: Sensitive::new("bob"),
            };
            request.perform(&app, &alice.session_user()).await.unwrap();
        })
        .await;
    }
}
