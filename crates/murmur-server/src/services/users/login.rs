use murmur_api_types::error::LoginFailed;
use murmur_api_types::util::Sensitive;
use murmur_error::ext::ResultExt;
use murmur_error::{ApiError, ApiErrorCategory};
use murmur_model::User;
use tokio::task::spawn_blocking;

use crate::auth::jwt::LoginClaims;
use crate::auth::password;
use crate::App;

#[derive(Debug)]
pub struct Login<'a> {
    /// Username or email address.
    pub login: Sensitive<&'a str>,
    pub password: Sensitive<&'a str>,
}

#[derive(Debug)]
pub struct LoginResponse {
    pub user: User,
    pub token: String,
}

impl Login<'_> {
    #[tracing::instrument(skip_all, fields(self), name = "services.users.login")]
    pub async fn perform(self, app: &App) -> Result<LoginResponse, ApiError> {
        let mut conn = app.db_read().await?;
        let user = User::find_by_login(&mut conn, &self.login).await?;

        // an unknown account answers exactly like a wrong password
        let Some(user) = user else {
            return Err(invalid_credentials());
        };

        let passphrase = self.password.to_string();
        let stored_hash = user.password_hash.clone();
        let valid = spawn_blocking(move || password::verify(&passphrase, &stored_hash))
            .await
            .erase_context()??;

        if !valid {
            return Err(invalid_credentials());
        }

        let claims = LoginClaims::new(user.id, app.config.auth.token_expiry);
        let token = claims.encode(app.config.auth.jwt_secret.value())?;

        Ok(LoginResponse { user, token })
    }
}

fn invalid_credentials() -> ApiError {
    ApiError::new(ApiErrorCategory::LoginFailed(LoginFailed::InvalidCredentials))
        .message("Invalid username, email or password")
}
