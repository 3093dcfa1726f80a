use murmur_api_types::util::Sensitive;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::comment::InsertComment;
use murmur_model::id::PostId;
use murmur_model::{Comment, Post};

use crate::extract::SessionUser;
use crate::services::util::is_valid_comment_text;
use crate::App;

#[derive(Debug)]
pub struct CreateComment<'a> {
    pub post_id: Sensitive<PostId>,
    pub text: Sensitive<&'a str>,
}

#[derive(Debug)]
#[must_use]
pub enum CreateCommentOutcome {
    Created(Comment),
    /// An empty comment is dropped without persisting anything; the
    /// submitter still lands back on the post page.
    SkippedEmpty(PostId),
}

impl CreateComment<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.posts.comment")]
    pub async fn perform(
        self,
        app: &App,
        session_user: &SessionUser,
    ) -> Result<CreateCommentOutcome, ApiError> {
        let mut conn = app.db_write().await?;

        let Some(post) = Post::find(&mut conn, *self.post_id.value()).await? else {
            let error =
                ApiError::new(ApiErrorCategory::NotFound).message("Could not find post specified");

            return Err(error);
        };

        if !is_valid_comment_text(&self.text) {
            return Ok(CreateCommentOutcome::SkippedEmpty(post.id));
        }

        let comment = InsertComment::builder()
            .post_id(post.id)
            .author_id(session_user.id)
            .content(*self.text.value())
            .build()
            .insert(&mut conn)
            .await?;

        conn.commit().await?;

        Ok(CreateCommentOutcome::Created(comment))
    }
}
