use serde::{Deserialize, Serialize};

/// Public profile data of a user. Nothing in here is private: this is
/// what other visitors see next to a post or on a profile page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserData {
    pub id: i64,
    pub name: String,
    pub display_name: Option<String>,
}
