use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::user::UserData;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CommentData {
    pub id: i64,
    pub created: NaiveDateTime,
    pub text: String,
    pub author: UserData,
}
