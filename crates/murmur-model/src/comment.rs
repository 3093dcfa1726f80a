use bon::Builder;
use chrono::NaiveDateTime;
use sea_query::Iden;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::id::{CommentId, PostId, UserId};
use crate::user::UserView;

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Comment {
    pub id: CommentId,
    pub created: NaiveDateTime,
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: String,
}

#[derive(Builder)]
pub struct InsertComment<'a> {
    pub post_id: PostId,
    pub author_id: UserId,
    pub content: &'a str,
}

/// Columns of the `comments` table.
#[derive(Debug, Clone, Copy, Iden)]
pub enum CommentIdent {
    Comments,
    Id,
    Created,
    PostId,
    AuthorId,
    Content,
}

/// A comment joined with its author's public data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentView {
    pub comment: Comment,
    pub author: UserView,
}

impl<'r> FromRow<'r, PgRow> for CommentView {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let comment = Comment::from_row(row)?;
        let author = UserView {
            id: comment.author_id,
            name: row.try_get("author_name")?,
            display_name: row.try_get("author_display_name")?,
        };

        Ok(Self { comment, author })
    }
}
