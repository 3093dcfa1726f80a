mod json;
mod session_user;

pub use self::json::Json;
pub use self::session_user::{login_redirect, MaybeSessionUser, SessionUser};
