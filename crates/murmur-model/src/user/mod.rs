use bon::Builder;
use chrono::NaiveDateTime;
use sea_query::Iden;
use sqlx::FromRow;

use crate::id::UserId;

mod follower;
pub use self::follower::{Follower, FollowerIdent};

#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: UserId,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub name: String,
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub password_hash: String,
}

#[derive(Builder)]
pub struct InsertUser<'a> {
    pub name: &'a str,
    pub display_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub password_hash: &'a str,
}

/// Columns of the `users` table.
#[derive(Debug, Clone, Copy, Iden)]
pub enum UserIdent {
    Users,
    Id,
    Created,
    Updated,
    Name,
    DisplayName,
    Email,
    PasswordHash,
}

/// The public slice of a user embedded into joined views and responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub display_name: Option<String>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            display_name: user.display_name.clone(),
        }
    }
}
