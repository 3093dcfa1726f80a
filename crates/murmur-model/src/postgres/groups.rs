use murmur_db::pool::PgConnection;
use murmur_error::ext::{ErrorResultExt, ResultExt};
use murmur_error::Result;
use sea_query::{Asterisk, Expr, ExprTrait, PostgresQueryBuilder, Query};
use sea_query_binder::SqlxBinder;
use thiserror::Error;

use crate::group::{Group, GroupIdent, InsertGroup};
use crate::id::GroupId;

impl Group {
    #[tracing::instrument(skip_all, name = "db.groups.find")]
    pub async fn find(conn: &mut PgConnection, id: GroupId) -> Result<Option<Self>> {
        let (sql, values) = Query::select()
            .column(Asterisk)
            .from(GroupIdent::Groups)
            .and_where(Expr::col(GroupIdent::Id).eq(id.0))
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Group, _>(&sql, values)
            .fetch_optional(conn)
            .await
            .erase_context()
            .attach_printable("could not find group by id")
    }

    #[tracing::instrument(skip_all, name = "db.groups.find_by_slug")]
    pub async fn find_by_slug(conn: &mut PgConnection, slug: &str) -> Result<Option<Self>> {
        let (sql, values) = Query::select()
            .column(Asterisk)
            .from(GroupIdent::Groups)
            .and_where(Expr::col(GroupIdent::Slug).eq(slug))
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Group, _>(&sql, values)
            .fetch_optional(conn)
            .await
            .erase_context()
            .attach_printable("could not find group by slug")
    }
}

#[derive(Debug, Error)]
#[error("Could not insert group")]
pub struct InsertGroupError;

impl InsertGroup<'_> {
    #[tracing::instrument(skip_all, name = "db.groups.insert")]
    pub async fn insert(&self, conn: &mut PgConnection) -> Result<Group, InsertGroupError> {
        let (sql, values) = Query::insert()
            .into_table(GroupIdent::Groups)
            .columns([GroupIdent::Title, GroupIdent::Slug, GroupIdent::Description])
            .values_panic([self.title.into(), self.slug.into(), self.description.into()])
            .returning_all()
            .build_sqlx(PostgresQueryBuilder);

        sqlx::query_as_with::<_, Group, _>(&sql, values)
            .fetch_one(conn)
            .await
            .change_context(InsertGroupError)
    }
}
