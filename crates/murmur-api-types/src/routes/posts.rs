use serde::{Deserialize, Serialize};

use crate::comment::CommentData;
use crate::group::GroupData;
use crate::pagination::Paged;
use crate::post::PostData;

/// Publish a new post as the authenticated user.
///
/// The author is always the session user; any author supplied by the
/// client is ignored. On success the server redirects to the author's
/// profile page.
///
/// **ROUTE**: `POST /create/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PublishPost {
    pub text: String,
    /// Id of the group the post belongs to, if any.
    pub group: Option<i64>,
    pub image: Option<String>,
}

/// Replace the text, group and image of an existing post. Only the
/// post's author may do this; anyone else is bounced back to the post
/// detail page unchanged.
///
/// **ROUTE**: `POST /posts/{id}/edit/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EditPost {
    pub text: String,
    pub group: Option<i64>,
    pub image: Option<String>,
}

/// Attach a comment to a post.
///
/// **ROUTE**: `POST /posts/{id}/comment/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateComment {
    pub text: String,
}

/// Response body of the group feed page.
///
/// **ROUTE**: `GET /group/{slug}/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupFeedPayload {
    pub group: GroupData,
    pub posts: Paged<PostData>,
}

/// Response body of the post detail page: the post itself, its comments
/// newest-first, and how many posts its author has published in total.
///
/// **ROUTE**: `GET /posts/{id}/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostDetailPayload {
    pub post: PostData,
    pub author_post_count: u64,
    pub comments: Vec<CommentData>,
}
