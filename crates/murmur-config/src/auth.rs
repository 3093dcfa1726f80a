use murmur_error::ext::ErrorResultExt;
use murmur_error::Result;
use murmur_utils::env;
use murmur_utils::Sensitive;
use std::time::Duration;

use crate::{vars, LoadConfigError};

#[derive(Debug, Clone)]
pub struct Auth {
    /// Secret used to sign and verify login tokens.
    pub jwt_secret: Sensitive<String>,
    /// How long an issued login token stays valid.
    pub token_expiry: Duration,
}

#[derive(Debug, Clone, Default)]
pub struct PartialAuth {
    pub jwt_secret: Option<String>,
    pub token_expiry_secs: Option<u64>,
}

impl Auth {
    // one week
    pub(crate) const DEFAULT_TOKEN_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

    pub fn from_partial(partial: PartialAuth) -> Result<Self, LoadConfigError> {
        let Some(jwt_secret) = partial.jwt_secret else {
            return Err(murmur_error::Error::new(
                murmur_error::ApiErrorCategory::Unknown,
                LoadConfigError,
            )
            .attach_printable(format!("{} must be set", vars::AUTH_JWT_SECRET)));
        };

        Ok(Self {
            jwt_secret: Sensitive::new(jwt_secret),
            token_expiry: partial
                .token_expiry_secs
                .map(Duration::from_secs)
                .unwrap_or(Self::DEFAULT_TOKEN_EXPIRY),
        })
    }
}

impl PartialAuth {
    pub fn from_env() -> Result<Self, LoadConfigError> {
        Ok(Self {
            jwt_secret: env::var_opt(vars::AUTH_JWT_SECRET).change_context(LoadConfigError)?,
            token_expiry_secs: env::var_opt_parsed(vars::AUTH_TOKEN_EXPIRY)
                .change_context(LoadConfigError)?,
        })
    }
}
