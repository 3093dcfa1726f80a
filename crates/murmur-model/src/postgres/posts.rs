use murmur_db::pool::PgConnection;
use murmur_error::ext::{ErrorResultExt, ResultExt};
use murmur_error::Result;
use sea_query::{
    Alias, Expr, ExprTrait, Func, Iden, JoinType, Order, PostgresQueryBuilder, Query,
    SelectStatement,
};
use sea_query_binder::SqlxBinder;
use thiserror::Error;

use crate::group::GroupIdent;
use crate::id::{GroupId, PostId, UserId};
use crate::post::{InsertPost, Post, PostIdent, PostView, UpdatePost};
use crate::user::{FollowerIdent, UserIdent};

#[derive(Debug, Clone, Copy, Iden)]
enum LocalIdent {
    /// Alias for `posts`
    P,
    /// Alias for `users`
    U,
    /// Alias for `groups`
    G,
    /// Alias for `followers`
    F,
}

impl Post {
    #[tracing::instrument(skip_all, name = "db.posts.find")]
    pub async fn find(conn: &mut PgConnection, id: PostId) -> Result<Option<Self>> {
        let (sql, values) = Query::select()
            .column(sea_query::Asterisk)
            .from(PostIdent::Posts)
            .and_where(Expr::col(PostIdent::Id).eq(id.0))
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_optional(conn)
            .await
            .erase_context()
            .attach_printable("could not find post by id")
    }

    #[tracing::instrument(skip_all, name = "db.posts.count_by_author")]
    pub async fn count_by_author(conn: &mut PgConnection, author_id: UserId) -> Result<u64> {
        let (sql, values) = Query::select()
            .expr(Func::count(Expr::col(PostIdent::Id)))
            .from(PostIdent::Posts)
            .and_where(Expr::col(PostIdent::AuthorId).eq(author_id.0))
            .build_sqlx(PostgresQueryBuilder);

        let total = sqlx::query_scalar_with::<_, i64, _>(&sql, values)
            .fetch_one(conn)
            .await
            .erase_context()
            .attach_printable("could not count posts of an author")?;

        Ok(total.max(0) as u64)
    }
}

impl PostView {
    #[tracing::instrument(skip_all, name = "db.post_view.find")]
    pub async fn find(conn: &mut PgConnection, id: PostId) -> Result<Option<Self>> {
        let (sql, values) = select_post_view()
            .and_where(Expr::col((LocalIdent::P, PostIdent::Id)).eq(id.0))
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Self, _>(&sql, values)
            .fetch_optional(conn)
            .await
            .erase_context()
            .attach_printable("could not find post view from post id")
    }

    #[tracing::instrument(skip_all, name = "db.post_view.count_all")]
    pub async fn count_all(conn: &mut PgConnection) -> Result<u64> {
        let (sql, values) = Query::select()
            .expr(Func::count(Expr::col(PostIdent::Id)))
            .from(PostIdent::Posts)
            .build_sqlx(PostgresQueryBuilder);

        fetch_count(conn, &sql, values).await
    }

    /// Lists every post, newest first.
    #[tracing::instrument(skip_all, name = "db.post_view.list_all")]
    pub async fn list_all(conn: &mut PgConnection, offset: u64, limit: u64) -> Result<Vec<Self>> {
        let (sql, values) = select_post_view()
            .offset(offset)
            .limit(limit)
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Self, _>(&sql, values)
            .fetch_all(conn)
            .await
            .erase_context()
            .attach_printable("could not fetch posts for the home feed")
    }

    #[tracing::instrument(skip_all, name = "db.post_view.count_by_group")]
    pub async fn count_by_group(conn: &mut PgConnection, group_id: GroupId) -> Result<u64> {
        let (sql, values) = Query::select()
            .expr(Func::count(Expr::col(PostIdent::Id)))
            .from(PostIdent::Posts)
            .and_where(Expr::col(PostIdent::GroupId).eq(group_id.0))
            .build_sqlx(PostgresQueryBuilder);

        fetch_count(conn, &sql, values).await
    }

    #[tracing::instrument(skip_all, name = "db.post_view.list_by_group")]
    pub async fn list_by_group(
        conn: &mut PgConnection,
        group_id: GroupId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>> {
        let (sql, values) = select_post_view()
            .and_where(Expr::col((LocalIdent::P, PostIdent::GroupId)).eq(group_id.0))
            .offset(offset)
            .limit(limit)
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Self, _>(&sql, values)
            .fetch_all(conn)
            .await
            .erase_context()
            .attach_printable("could not fetch posts of a group")
    }

    #[tracing::instrument(skip_all, name = "db.post_view.list_by_author")]
    pub async fn list_by_author(
        conn: &mut PgConnection,
        author_id: UserId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>> {
        let (sql, values) = select_post_view()
            .and_where(Expr::col((LocalIdent::P, PostIdent::AuthorId)).eq(author_id.0))
            .offset(offset)
            .limit(limit)
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Self, _>(&sql, values)
            .fetch_all(conn)
            .await
            .erase_context()
            .attach_printable("could not fetch posts of an author")
    }

    #[tracing::instrument(skip_all, name = "db.post_view.count_followed")]
    pub async fn count_followed(conn: &mut PgConnection, user_id: UserId) -> Result<u64> {
        let (sql, values) = Query::select()
            .expr(Func::count(Expr::col((LocalIdent::P, PostIdent::Id))))
            .from_as(PostIdent::Posts, LocalIdent::P)
            .join_as(
                JoinType::Join,
                FollowerIdent::Followers,
                LocalIdent::F,
                Expr::col((LocalIdent::F, FollowerIdent::TargetId))
                    .equals((LocalIdent::P, PostIdent::AuthorId)),
            )
            .and_where(Expr::col((LocalIdent::F, FollowerIdent::SourceId)).eq(user_id.0))
            .build_sqlx(PostgresQueryBuilder);

        fetch_count(conn, &sql, values).await
    }

    /// Lists posts whose author is followed by `user_id`, newest first.
    #[tracing::instrument(skip_all, name = "db.post_view.list_followed")]
    pub async fn list_followed(
        conn: &mut PgConnection,
        user_id: UserId,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<Self>> {
        let (sql, values) = select_post_view()
            .join_as(
                JoinType::Join,
                FollowerIdent::Followers,
                LocalIdent::F,
                Expr::col((LocalIdent::F, FollowerIdent::TargetId))
                    .equals((LocalIdent::P, PostIdent::AuthorId)),
            )
            .and_where(Expr::col((LocalIdent::F, FollowerIdent::SourceId)).eq(user_id.0))
            .offset(offset)
            .limit(limit)
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Self, _>(&sql, values)
            .fetch_all(conn)
            .await
            .erase_context()
            .attach_printable("could not fetch posts for the following feed")
    }
}

fn select_post_view() -> SelectStatement {
    Query::select()
        .columns([
            (LocalIdent::P, PostIdent::Id),
            (LocalIdent::P, PostIdent::Created),
            (LocalIdent::P, PostIdent::Updated),
            (LocalIdent::P, PostIdent::AuthorId),
            (LocalIdent::P, PostIdent::GroupId),
            (LocalIdent::P, PostIdent::Content),
            (LocalIdent::P, PostIdent::Image),
        ])
        .expr_as(
            Expr::col((LocalIdent::U, UserIdent::Name)),
            Alias::new("author_name"),
        )
        .expr_as(
            Expr::col((LocalIdent::U, UserIdent::DisplayName)),
            Alias::new("author_display_name"),
        )
        .expr_as(
            Expr::col((LocalIdent::G, GroupIdent::Title)),
            Alias::new("group_title"),
        )
        .expr_as(
            Expr::col((LocalIdent::G, GroupIdent::Slug)),
            Alias::new("group_slug"),
        )
        .from_as(PostIdent::Posts, LocalIdent::P)
        .join_as(
            JoinType::Join,
            UserIdent::Users,
            LocalIdent::U,
            Expr::col((LocalIdent::U, UserIdent::Id)).equals((LocalIdent::P, PostIdent::AuthorId)),
        )
        .join_as(
            JoinType::LeftJoin,
            GroupIdent::Groups,
            LocalIdent::G,
            Expr::col((LocalIdent::G, GroupIdent::Id)).equals((LocalIdent::P, PostIdent::GroupId)),
        )
        .order_by((LocalIdent::P, PostIdent::Created), Order::Desc)
        .order_by((LocalIdent::P, PostIdent::Id), Order::Desc)
        .take()
}

async fn fetch_count(
    conn: &mut PgConnection,
    sql: &str,
    values: sea_query_binder::SqlxValues,
) -> Result<u64> {
    let total = sqlx::query_scalar_with::<_, i64, _>(sql, values)
        .fetch_one(conn)
        .await
        .erase_context()
        .attach_printable("could not count posts")?;

    Ok(total.max(0) as u64)
}

#[derive(Debug, Error)]
#[error("Could not insert post")]
pub struct InsertPostError;

impl InsertPost<'_> {
    #[tracing::instrument(skip_all, name = "db.posts.insert")]
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<Post, InsertPostError> {
        let (sql, values) = Query::insert()
            .into_table(PostIdent::Posts)
            .columns([
                PostIdent::AuthorId,
                PostIdent::GroupId,
                PostIdent::Content,
                PostIdent::Image,
            ])
            .values_panic([
                self.author_id.0.into(),
                self.group_id.map(|id| id.0).into(),
                self.content.into(),
                self.image.into(),
            ])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_one(conn)
            .await
            .change_context(InsertPostError)
    }
}

#[derive(Debug, Error)]
#[error("Could not update post")]
pub struct UpdatePostError;

impl UpdatePost<'_> {
    #[tracing::instrument(skip_all, name = "db.posts.update")]
    pub async fn update(&self, conn: &mut PgConnection) -> Result<Post, UpdatePostError> {
        let (sql, values) = Query::update()
            .table(PostIdent::Posts)
            .value(PostIdent::Content, self.content)
            .value(PostIdent::GroupId, self.group_id.map(|id| id.0))
            .value(PostIdent::Image, self.image)
            .value(PostIdent::Updated, Expr::cust("(now() AT TIME ZONE 'utc')"))
            .and_where(Expr::col(PostIdent::Id).eq(self.id.0))
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Post, _>(&sql, values)
            .fetch_one(conn)
            .await
            .change_context(UpdatePostError)
    }
}
