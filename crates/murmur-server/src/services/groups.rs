use murmur_api_types::util::Sensitive;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::pagination::{Page, Paginator};
use murmur_model::post::PostView;
use murmur_model::Group;

use crate::App;

/// Assembles the feed page of one group: the group's own data plus its
/// posts, newest first.
#[derive(Debug)]
pub struct GetGroupFeed<'a> {
    pub slug: Sensitive<&'a str>,
    pub page: Option<u64>,
}

#[derive(Debug)]
pub struct GetGroupFeedResponse {
    pub group: Group,
    pub posts: Page<PostView>,
}

impl GetGroupFeed<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.groups.feed")]
    pub async fn perform(self, app: &App) -> Result<GetGroupFeedResponse, ApiError> {
        let mut conn = app.db_read().await?;

        let Some(group) = Group::find_by_slug(&mut conn, &self.slug).await? else {
            let error =
                ApiError::new(ApiErrorCategory::NotFound).message("Could not find group specified");

            return Err(error);
        };

        let total_items = PostView::count_by_group(&mut conn, group.id).await?;
        let paginator = Paginator::new(total_items, app.config.posts_per_page);
        let number = paginator.clamp(self.page);

        let items = PostView::list_by_group(
            &mut conn,
            group.id,
            paginator.offset(number),
            paginator.per_page(),
        )
        .await?;

        Ok(GetGroupFeedResponse {
            group,
            posts: Page {
                items,
                number,
                total_pages: paginator.total_pages(),
                total_items,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{self, TestResultExt};
    use assert_json_diff::assert_json_include;
    use murmur_api_types::util::Sensitive;
    use serde_json::json;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_reject_an_unknown_slug() {
        test_utils::with_test_app(concat!(module_path!(), "::unknown"), |app| async move {
            let request = super::GetGroupFeed {
                slug: Sensitive::new("does-not-exist"),
                page: None,
            };

            let error = request.perform(&app).await.expect_error_json();
            assert_json_include!(actual: error, expected: json!({ "code": "not_found" }));
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_only_list_the_groups_posts() {
        test_utils::with_test_app(concat!(module_path!(), "::feed"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let group = test_utils::groups::create()
                .app(&app)
                .title("Rustaceans")
                .slug("rustaceans")
                .call()
                .await;

            test_utils::posts::publish()
                .app(&app)
                .session(&alice)
                .text("posted into the group")
                .group_id(group.id)
                .call()
                .await;
            test_utils::posts::publish()
                .app(&app)
                .session(&alice)
                .text("posted outside of it")
                .call()
                .await;

            let request = super::GetGroupFeed {
                slug: Sensitive::new("rustaceans"),
                page: None,
            };
            let response = request.perform(&app).await.unwrap();

            assert_eq!(response.group.slug, "rustaceans");
            assert_eq!(response.posts.items.len(), 1);
            assert_eq!(response.posts.items[0].post.content, "posted into the group");
        })
        .await;
    }
}
