use axum::response::{IntoResponse, Response};
use murmur_api_types::routes::users::{Login, LoginResponse, Signup, SignupResponse};
use murmur_api_types::util::Sensitive;
use murmur_error::ApiError;

use super::build_user_data_from_user;
use crate::extract::Json;
use crate::services;
use crate::App;

/// Serves `POST /auth/signup/`, registering an account.
pub async fn signup(app: App, Json(data): Json<Signup>) -> Result<Response, ApiError> {
    let request = services::users::Signup {
        name: Sensitive::new(data.name.as_str()),
        email: data.email.as_deref().map(Sensitive::new),
        password: Sensitive::new(data.password.as_str()),
    };
    let response = request.perform(&app).await?;

    Ok(Json(SignupResponse {
        user: build_user_data_from_user(&response.user),
    })
    .into_response())
}

/// Serves `POST /auth/login/`, exchanging credentials for a bearer token.
pub async fn login(app: App, Json(data): Json<Login>) -> Result<Response, ApiError> {
    let request = services::users::Login {
        login: Sensitive::new(data.login.as_str()),
        password: Sensitive::new(data.password.as_str()),
    };
    let response = request.perform(&app).await?;

    Ok(Json(LoginResponse {
        token: response.token,
        user: build_user_data_from_user(&response.user),
    })
    .into_response())
}
