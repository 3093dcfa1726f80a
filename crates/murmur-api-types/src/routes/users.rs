use serde::{Deserialize, Serialize};

use crate::pagination::Paged;
use crate::post::PostData;
use crate::user::UserData;

/// Register a new account.
///
/// **ROUTE**: `POST /auth/signup/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Signup {
    pub name: String,
    pub email: Option<String>,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignupResponse {
    pub user: UserData,
}

/// Log in with a username or email address and obtain a bearer token.
///
/// **ROUTE**: `POST /auth/login/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Login {
    /// Username or email address.
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserData,
}

/// Response body of a profile page: the author's data, their posts and
/// whether the viewing user currently follows them (`false` for
/// anonymous visitors).
///
/// **ROUTE**: `GET /profile/{username}/`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ProfilePayload {
    pub author: UserData,
    pub following: bool,
    pub post_count: u64,
    pub posts: Paged<PostData>,
}
