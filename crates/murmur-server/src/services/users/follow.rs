use murmur_api_types::util::Sensitive;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::user::Follower;
use murmur_model::User;

use crate::extract::SessionUser;
use crate::App;

/// Subscribes the session user to an author's posts.
///
/// Following an author twice, or yourself, is a silent no-op; the
/// caller redirects to the author's profile regardless of outcome.
#[derive(Debug)]
pub struct FollowUser<'a> {
    pub username: Sensitive<&'a str>,
}

impl FollowUser<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.users.profile.follow")]
    pub async fn perform(self, app: &App, session_user: &SessionUser) -> Result<User, ApiError> {
        let mut conn = app.db_write().await?;

        let Some(target) = User::find_by_name(&mut conn, &self.username).await? else {
            let error =
                ApiError::new(ApiErrorCategory::NotFound).message("Could not find user specified");

            return Err(error);
        };

        if target.id != session_user.id {
            Follower::follow(&mut conn, session_user.id, target.id).await?;
            conn.commit().await?;
        }

        Ok(target)
    }
}
