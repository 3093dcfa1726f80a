use bon::Builder;
use chrono::NaiveDateTime;
use sea_query::Iden;
use sqlx::FromRow;

use crate::id::GroupId;

/// A named category a post can optionally belong to.
///
/// Groups are created administratively; user-facing flows only read
/// them.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Group {
    pub id: GroupId,
    pub created: NaiveDateTime,
    pub title: String,
    pub slug: String,
    pub description: String,
}

#[derive(Builder)]
pub struct InsertGroup<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub description: &'a str,
}

/// Columns of the `groups` table.
#[derive(Debug, Clone, Copy, Iden)]
pub enum GroupIdent {
    Groups,
    Id,
    Created,
    Title,
    Slug,
    Description,
}
