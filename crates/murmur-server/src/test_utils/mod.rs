//! Shared fixtures for the Postgres-backed service tests.
//!
//! Every test provisions its own database through
//! [`murmur_db::testing`]; the fixtures below go through the real
//! services so they exercise the same code paths the routes do.

use murmur_error::ApiError;
use std::fmt::Debug;
use std::future::Future;

use crate::App;

pub mod groups;
pub mod posts;
pub mod users;

pub async fn with_test_app<F, C>(path: &'static str, callback: C)
where
    F: Future<Output = ()>,
    C: FnOnce(App) -> F,
{
    murmur_db::testing::test_with_pool(path, &murmur_db::MIGRATIONS, |pool| async move {
        callback(App::new_for_tests(pool.into())).await;
    })
    .await;
}

pub trait TestResultExt {
    /// Serializes the error of a `Result<T, ApiError>` into a
    /// [`serde_json::Value`] for assertions.
    ///
    /// ## Panics
    /// Panics if the result is [`Ok`].
    fn expect_error_json(self) -> serde_json::Value;
}

impl<T: Debug> TestResultExt for Result<T, ApiError> {
    fn expect_error_json(self) -> serde_json::Value {
        match self {
            Ok(okay) => panic!("unexpected value Ok({okay:?}), expected error"),
            Err(error) => serde_json::to_value(error).unwrap(),
        }
    }
}
