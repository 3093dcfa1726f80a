mod comment;
mod detail;
mod edit;
mod feed;
mod publish;

pub use self::comment::{CreateComment, CreateCommentOutcome};
pub use self::detail::{GetPostDetail, GetPostDetailResponse};
pub use self::edit::{EditPost, EditPostOutcome};
pub use self::feed::{FollowingFeed, HomeFeed};
pub use self::publish::{PublishPost, PublishPostResponse};
