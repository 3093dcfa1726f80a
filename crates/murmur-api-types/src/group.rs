use serde::{Deserialize, Serialize};

/// A group as shown on its own feed page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GroupData {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}
