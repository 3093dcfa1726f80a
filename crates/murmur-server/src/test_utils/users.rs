use murmur_api_types::util::Sensitive;
use murmur_model::User;

use crate::extract::SessionUser;
use crate::services;
use crate::App;

/// Fixed passphrase every test account registers with.
pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub struct UserSessionData {
    pub user: User,
    /// The user's login token.
    pub token: String,
}

impl UserSessionData {
    /// Builds the extractor value the services take, same as the auth
    /// middleware would.
    #[must_use]
    pub fn session_user(&self) -> SessionUser {
        SessionUser {
            user: self.user.clone(),
        }
    }
}

#[bon::builder]
pub async fn register(app: &App, name: &str, email: Option<&str>) -> User {
    let request = services::users::Signup {
        name: Sensitive::new(name),
        email: email.map(Sensitive::new),
        password: Sensitive::new(TEST_PASSWORD),
    };

    request.perform(app).await.unwrap().user
}

#[bon::builder]
pub async fn start_session(app: &App, name: &str, email: Option<&str>) -> UserSessionData {
    register().app(app).name(name).maybe_email(email).call().await;

    let request = services::users::Login {
        login: Sensitive::new(name),
        password: Sensitive::new(TEST_PASSWORD),
    };

    let response = request.perform(app).await.unwrap();
    UserSessionData {
        user: response.user,
        token: response.token,
    }
}

pub async fn follow(app: &App, session: &UserSessionData, target: &str) {
    let request = services::users::FollowUser {
        username: Sensitive::new(target),
    };
    request.perform(app, &session.session_user()).await.unwrap();
}
