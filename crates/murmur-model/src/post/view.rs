use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

use crate::post::Post;
use crate::user::UserView;

/// A post joined with the author and group data needed to render it
/// anywhere a feed or detail page shows posts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostView {
    pub post: Post,
    pub author: UserView,
    pub group: Option<PostViewGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostViewGroup {
    pub title: String,
    pub slug: String,
}

impl<'r> FromRow<'r, PgRow> for PostView {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let post = Post::from_row(row)?;
        let author = UserView {
            id: post.author_id,
            name: row.try_get("author_name")?,
            display_name: row.try_get("author_display_name")?,
        };

        // the group columns come from a left join, they are all present
        // or all null
        let group_title: Option<String> = row.try_get("group_title")?;
        let group_slug: Option<String> = row.try_get("group_slug")?;
        let group = group_title
            .zip(group_slug)
            .map(|(title, slug)| PostViewGroup { title, slug });

        Ok(Self {
            post,
            author,
            group,
        })
    }
}
