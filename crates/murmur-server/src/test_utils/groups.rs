use murmur_model::group::InsertGroup;
use murmur_model::Group;

use crate::App;

/// Groups have no user-facing creation flow, tests insert them the way
/// an administrator would.
#[bon::builder]
pub async fn create(app: &App, title: &str, slug: &str, description: Option<&str>) -> Group {
    let mut conn = app.db_write().await.unwrap();

    let group = InsertGroup::builder()
        .title(title)
        .slug(slug)
        .description(description.unwrap_or("a group for testing"))
        .build()
        .insert(&mut conn)
        .await
        .unwrap();

    conn.commit().await.unwrap();
    group
}
