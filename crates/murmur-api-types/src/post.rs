use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::user::UserData;

/// A post as it appears inside a feed or on its detail page, already
/// joined with the data needed to render it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostData {
    pub id: i64,
    pub created: NaiveDateTime,
    pub updated: Option<NaiveDateTime>,
    pub text: String,
    /// Reference to an externally stored image, if the post carries one.
    pub image: Option<String>,
    pub author: UserData,
    pub group: Option<PostGroup>,
}

/// The slice of group data a post embeds when it belongs to one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PostGroup {
    pub title: String,
    pub slug: String,
}
