mod follow;
mod login;
mod profile;
mod register;
mod unfollow;

pub use self::follow::FollowUser;
pub use self::login::{Login, LoginResponse};
pub use self::profile::{GetProfile, GetProfileResponse};
pub use self::register::{Signup, SignupResponse};
pub use self::unfollow::UnfollowUser;
