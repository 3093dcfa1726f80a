use murmur_api_types::error::SignupFailed;
use murmur_api_types::util::Sensitive;
use murmur_error::ext::ResultExt;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::user::InsertUser;
use murmur_model::User;
use tokio::task::spawn_blocking;

use crate::auth::password;
use crate::services::util::{is_valid_password, is_valid_username};
use crate::App;

#[derive(Debug)]
pub struct Signup<'a> {
    pub name: Sensitive<&'a str>,
    pub email: Option<Sensitive<&'a str>>,
    pub password: Sensitive<&'a str>,
}

#[derive(Debug)]
pub struct SignupResponse {
    pub user: User,
}

impl Signup<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.users.register")]
    pub async fn perform(self, app: &App) -> Result<SignupResponse, ApiError> {
        if !is_valid_username(&self.name) {
            let error = ApiError::new(ApiErrorCategory::SignupFailed(SignupFailed::InvalidUsername))
                .message("Usernames may only contain letters, digits and `_`, `.`, `-`");

            return Err(error);
        }

        if !is_valid_password(&self.password) {
            let error = ApiError::new(ApiErrorCategory::SignupFailed(SignupFailed::WeakPassword))
                .message("Passwords must be at least 8 characters long");

            return Err(error);
        }

        let mut conn = app.db_write().await?;

        if User::check_username_taken(&mut conn, &self.name).await? {
            let error = ApiError::new(ApiErrorCategory::SignupFailed(SignupFailed::UsernameTaken))
                .message("Username is already taken");

            return Err(error);
        }

        if let Some(email) = self.email.as_deref() {
            if User::check_email_taken(&mut conn, email).await? {
                let error = ApiError::new(ApiErrorCategory::SignupFailed(SignupFailed::EmailTaken))
                    .message("Email address is already taken");

                return Err(error);
            }
        }

        let passphrase = self.password.to_string();
        let password_hash = spawn_blocking(move || password::hash(&passphrase))
            .await
            .erase_context()??;

        let user = InsertUser::builder()
            .name(&self.name)
            .maybe_email(self.email.as_deref().copied())
            .password_hash(&password_hash)
            .build()
            .insert(&mut conn)
            .await?;

        conn.commit().await?;

        Ok(SignupResponse { user })
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
    async fn should_reject_a_taken_username_case_insensitively() {
        test_utils::with_test_app(concat!(module_path!(), "::taken"), |app| async move {
            test_utils::users::register()
                .app(&app)
                .name("alice")
                .call()
                .await;

            let request = super::Signup {
                name: Sensitive::new("ALICE"),
                email: None,
                password: Sensitive::new("correct horse battery staple"),
            };

            let error = request.perform(&app).await.expect_error_json();
            assert_json_include!(
                actual: error,
                expected: json!({
                    "code": "signup_failed",
                    "subcode": "username_taken",
                }),
            );
        })
        .await;
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    #[ignore = "requires a Postgres database (set DATABASE_URL)"]
    async fn should_register_and_hash_the_password() {
        test_utils::with_test_app(concat!(module_path!(), "::register"), |app| async move {
            let request = super::Signup {
                name: Sensitive::new("alice"),
                email: Some(Sensitive::new("alice@example.com")),
                password: Sensitive::new("correct horse battery staple"),
            };

            let response = request.perform(&app).await.unwrap();
            assert_eq!(response.user.name, "alice");
            assert_ne!(response.user.password_hash, "correct horse battery staple");
        })
        .await;
    }
}
