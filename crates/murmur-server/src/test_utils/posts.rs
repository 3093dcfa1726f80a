use murmur_api_types::util::Sensitive;
use murmur_model::id::{GroupId, PostId};
use murmur_model::{Comment, Post};

use crate::services;
use crate::App;

use super::users::UserSessionData;

#[bon::builder]
pub async fn publish(
    app: &App,
    session: &UserSessionData,
    text: &str,
    group_id: Option<GroupId>,
) -> Post {
    let request = services::posts::PublishPost {
        text: Sensitive::new(text),
        group: group_id.map(|id| id.0),
        image: None,
    };

    request
        .perform(app, &session.session_user())
        .await
        .unwrap()
        .post
}

#[bon::builder]
pub async fn comment(
    app: &App,
    session: &UserSessionData,
    post_id: PostId,
    text: &str,
) -> Comment {
    let request = services::posts::CreateComment {
        post_id: Sensitive::new(post_id),
        text: Sensitive::new(text),
    };

    let outcome = request.perform(app, &session.session_user()).await.unwrap();
    match outcome {
        services::posts::CreateCommentOutcome::Created(comment) => comment,
        services::posts::CreateCommentOutcome::SkippedEmpty(..) => {
            panic!("fixture comment was dropped as empty")
        }
    }
}
