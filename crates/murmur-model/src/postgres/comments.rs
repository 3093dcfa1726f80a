use murmur_db::pool::PgConnection;
use murmur_error::ext::{ErrorResultExt, ResultExt};
use murmur_error::Result;
use sea_query::{Alias, Expr, ExprTrait, Iden, JoinType, Order, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use thiserror::Error;

use crate::comment::{Comment, CommentIdent, CommentView, InsertComment};
use crate::id::PostId;
use crate::user::UserIdent;

#[derive(Debug, Clone, Copy, Iden)]
enum LocalIdent {
    /// Alias for `comments`
    C,
    /// Alias for `users`
    U,
}

impl CommentView {
    /// Lists every comment of a post, newest first.
    #[tracing::instrument(skip_all, name = "db.comments.list_for_post")]
    pub async fn list_for_post(conn: &mut PgConnection, post_id: PostId) -> Result<Vec<Self>> {
        let (sql, values) = Query::select()
            .columns([
                (LocalIdent::C, CommentIdent::Id),
                (LocalIdent::C, CommentIdent::Created),
                (LocalIdent::C, CommentIdent::PostId),
                (LocalIdent::C, CommentIdent::AuthorId),
                (LocalIdent::C, CommentIdent::Content),
            ])
            .expr_as(
                Expr::col((LocalIdent::U, UserIdent::Name)),
                Alias::new("author_name"),
            )
            .expr_as(
                Expr::col((LocalIdent::U, UserIdent::DisplayName)),
                Alias::new("author_display_name"),
            )
            .from_as(CommentIdent::Comments, LocalIdent::C)
            .join_as(
                JoinType::Join,
                UserIdent::Users,
                LocalIdent::U,
                Expr::col((LocalIdent::U, UserIdent::Id))
                    .equals((LocalIdent::C, CommentIdent::AuthorId)),
            )
            .and_where(Expr::col((LocalIdent::C, CommentIdent::PostId)).eq(post_id.0))
            .order_by((LocalIdent::C, CommentIdent::Created), Order::Desc)
            .order_by((LocalIdent::C, CommentIdent::Id), Order::Desc)
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Self, _>(&sql, values)
            .fetch_all(conn)
            .await
            .erase_context()
            .attach_printable("could not fetch comments of a post")
    }
}

#[derive(Debug, Error)]
#[error("Could not insert comment")]
pub struct InsertCommentError;

impl InsertComment<'_> {
    #[tracing::instrument(skip_all, name = "db.comments.insert")]
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<Comment, InsertCommentError> {
        let (sql, values) = Query::insert()
            .into_table(CommentIdent::Comments)
            .columns([
                CommentIdent::PostId,
                CommentIdent::AuthorId,
                CommentIdent::Content,
            ])
            .values_panic([
                self.post_id.0.into(),
                self.author_id.0.into(),
                self.content.into(),
            ])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Comment, _>(&sql, values)
            .fetch_one(conn)
            .await
            .change_context(InsertCommentError)
    }
}
