use bon::Builder;
use chrono::NaiveDateTime;
use sea_query::Iden;
use sqlx::FromRow;

use crate::id::{GroupId, PostId, UserId};

mod view;
pub use self::view::{PostView, PostViewGroup};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Post {
    pub id: PostId,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub author_id: UserId,
    pub group_id: Option<GroupId>,
    pub content: String,
    /// Reference to an externally stored image.
    pub image: Option<String>,
}

#[derive(Builder)]
pub struct InsertPost<'a> {
    pub author_id: UserId,
    pub group_id: Option<GroupId>,
    pub content: &'a str,
    pub image: Option<&'a str>,
}

/// Full replacement of a post's editable fields. `updated` is stamped
/// by the query itself.
#[derive(Builder)]
pub struct UpdatePost<'a> {
    pub id: PostId,
    pub content: &'a str,
    pub group_id: Option<GroupId>,
    pub image: Option<&'a str>,
}

/// Columns of the `posts` table.
#[derive(Debug, Clone, Copy, Iden)]
pub enum PostIdent {
    Posts,
    Id,
    Created,
    Updated,
    AuthorId,
    GroupId,
    Content,
    Image,
}
