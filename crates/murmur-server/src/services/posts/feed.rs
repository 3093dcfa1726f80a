use murmur_error::ApiError;
use murmur_model::pagination::{Page, Paginator};
use murmur_model::post::PostView;

use crate::extract::SessionUser;
use crate::App;

/// Assembles one page of the home feed: every post, newest first.
///
/// The route on top of this caches the rendered page; the service
/// itself always reads the database.
#[derive(Debug)]
pub struct HomeFeed {
    pub page: Option<u64>,
}

impl HomeFeed {
    #[tracing::instrument(skip_all, fields(self), name = "services.posts.home_feed")]
    pub async fn perform(self, app: &App) -> Result<Page<PostView>, ApiError> {
        let mut conn = app.db_read().await?;

        let total_items = PostView::count_all(&mut conn).await?;
        let paginator = Paginator::new(total_items, app.config.posts_per_page);
        let number = paginator.clamp(self.page);

        let items =
            PostView::list_all(&mut conn, paginator.offset(number), paginator.per_page()).await?;

        Ok(Page {
            items,
            number,
            total_pages: paginator.total_pages(),
            total_items,
        })
    }
}

/// Assembles one page of the following feed: posts whose author the
/// current user follows, newest first. Never cached.
#[derive(Debug)]
pub struct FollowingFeed {
    pub page: Option<u64>,
}

impl FollowingFeed {
    #[tracing::instrument(skip_all, fields(self), name = "services.posts.following_feed")]
    pub async fn perform(
        self,
        app: &App,
        session_user: &SessionUser,
    ) -> Result<Page<PostView>, ApiError> {
        let mut conn = app.db_read().await?;

        let total_items = PostView::count_followed(&mut conn, session_user.id).await?;
        let paginator = Paginator::new(total_items, app.config.posts_per_page);
        let number = paginator.clamp(self.page);

        let items = PostView::list_followed(
            &mut conn,
            session_user.id,
            paginator.offset(number),
            paginator.per_page(),
        )
        .await?;

        Ok(Page {
            items,
            number,
            total_pages: paginator.total_pages(),
            total_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::test_utils;

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_paginate_the_home_feed() {
        test_utils::with_test_app(concat!(module_path!(), "::home_feed"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;

            for index in 0..23 {
                test_utils::posts::publish()
                    .app(&app)
                    .session(&alice)
                    .text(&format!("post number {index}"))
                    .call()
                    .await;
            }

            let page_1 = super::HomeFeed { page: None }.perform(&app).await.unwrap();
            assert_eq!(page_1.items.len(), 10);
            assert_eq!(page_1.number, 1);
            assert_eq!(page_1.total_pages, 3);
            assert_eq!(page_1.total_items, 23);

            let page_2 = super::HomeFeed { page: Some(2) }.perform(&app).await.unwrap();
            assert_eq!(page_2.items.len(), 10);

            let page_3 = super::HomeFeed { page: Some(3) }.perform(&app).await.unwrap();
            assert_eq!(page_3.items.len(), 3);

            // past the end clamps to the last page
            let clamped = super::HomeFeed { page: Some(99) }.perform(&app).await.unwrap();
            assert_eq!(clamped.number, 3);
            assert_eq!(clamped.items, page_3.items);
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_only_show_followed_authors() {
        test_utils::with_test_app(concat!(module_path!(), "::following"), |app| async move {
            let alice = test_utils::users::start_session()
                .app(&app)
                .name("alice")
                .call()
                .await;
            let bob = test_utils::users::start_session()
                .app(&app)
                .name("bob")
                .call()
                .await;
            let caryl = test_utils::users::start_session()
                .app(&app)
                .name("caryl")
                .call()
                .await;

            test_utils::posts::publish()
                .app(&app)
                .session(&bob)
                .text("bob writes something")
                .call()
                .await;
            test_utils::posts::publish()
                .app(&app)
                .session(&caryl)
                .text("caryl writes something")
                .call()
                .await;

            test_utils::users::follow(&app, &alice, "bob").await;

            let feed = super::FollowingFeed { page: None }
                .perform(&app, &alice.session_user())
                .await
                .unwrap();

            assert_eq!(feed.items.len(), 1);
            assert_eq!(feed.items[0].author.name, "bob");

            // caryl follows nobody and sees nothing
            let feed = super::FollowingFeed { page: None }
                .perform(&app, &caryl.session_user())
                .await
                .unwrap();

            assert!(feed.items.is_empty());
        })
        .await;
    }
}
