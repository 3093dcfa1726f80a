use murmur_api_types::util::Sensitive;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::comment::CommentView;
use murmur_model::id::PostId;
use murmur_model::post::PostView;
use murmur_model::Post;

use crate::App;

#[derive(Debug)]
pub struct GetPostDetail {
    pub id: Sensitive<PostId>,
}

#[derive(Debug)]
pub struct GetPostDetailResponse {
    pub post: PostView,
    /// How many posts the author has published in total.
    pub author_post_count: u64,
    /// The post's comments, newest first.
    pub comments: Vec<CommentView>,
}

impl GetPostDetail {
    #[tracing::instrument(skip_all, fields(self), name = "services.posts.get")]
    pub async fn perform(self, app: &App) -> Result<GetPostDetailResponse, ApiError> {
        let mut conn = app.db_read().await?;

        let Some(post) = PostView::find(&mut conn, *self.id.value()).await? else {
            let error =
                ApiError::new(ApiErrorCategory::NotFound).message("Could not find post specified");

            return Err(error);
        };

        let author_post_count = Post::count_by_author(&mut conn, post.author.id).await?;
        let comments = CommentView::list_for_post(&mut conn, post.post.id).await?;

        Ok(GetPostDetailResponse {
            post,
            author_post_count,
            comments,
        })
    }
}
