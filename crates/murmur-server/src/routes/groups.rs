use axum::extract::{Path, Query};
use axum::response::{IntoResponse, Response};
use murmur_api_types::group::GroupData;
use murmur_api_types::pagination::PageParams;
use murmur_api_types::routes::posts::GroupFeedPayload;
use murmur_api_types::util::Sensitive;
use murmur_error::ApiError;

use super::build_paged_posts;
use crate::extract::Json;
use crate::services;
use crate::App;

/// Serves `GET /group/{slug}/`, the feed of one group.
pub async fn feed(
    app: App,
    Path(slug): Path<String>,
    Query(params): Query<PageParams>,
) -> Result<Response, ApiError> {
    let response = services::groups::GetGroupFeed {
        slug: Sensitive::new(slug.as_str()),
        page: params.page,
    }
    .perform(&app)
    .await?;

    let payload = GroupFeedPayload {
        group: GroupData {
            id: response.group.id.0,
            title: response.group.title,
            slug: response.group.slug,
            description: response.group.description,
        },
        posts: build_paged_posts(response.posts),
    };

    Ok(Json(payload).into_response())
}
