//! Domain entities of the Murmur blogging platform and their Postgres
//! query implementations.

mod postgres;

pub mod comment;
pub mod group;
pub mod id;
pub mod pagination;
pub mod post;
pub mod user;

pub use self::comment::Comment;
pub use self::group::Group;
pub use self::post::Post;
pub use self::user::User;
