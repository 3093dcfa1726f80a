use chrono::NaiveDateTime;
use sea_query::Iden;
use sqlx::FromRow;

use crate::id::{FollowerId, UserId};

/// A follow relationship: `source` subscribed to `target`'s posts.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Follower {
    pub id: FollowerId,
    pub created: NaiveDateTime,
    pub source_id: UserId,
    pub target_id: UserId,
}

/// Columns of the `followers` table.
#[derive(Debug, Clone, Copy, Iden)]
pub enum FollowerIdent {
    Followers,
    Id,
    Created,
    SourceId,
    TargetId,
}
