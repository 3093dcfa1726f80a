//! Environment variable access that reports through [`murmur_error`].

use error_stack::Context;
use murmur_error::ext::ErrorResultExt;
use murmur_error::{Error, Result};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
#[error("Failed to load .env file")]
pub struct LoadDotenvError;

/// Loads the nearest `.env` file into the process environment.
///
/// A missing file is not an error, the variables simply stay as the
/// process received them.
pub fn load_dotenv() -> Result<Option<PathBuf>, LoadDotenvError> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(error) if error.not_found() => Ok(None),
        Err(error) => Err(Error::unknown(error))
            .change_context(LoadDotenvError)
            .attach_printable("could not load environment variables from `.env`"),
    }
}

#[derive(Debug, ThisError)]
#[error("Could not get value of an environment variable")]
pub struct VarError;

#[track_caller]
pub fn var(key: &str) -> Result<String, VarError> {
    match std::env::var(key) {
        Ok(value) => Ok(value),
        Err(error) => Err(Error::unknown(error)
            .change_context(VarError)
            .attach_printable(format!("{key:?} is missing or not valid UTF-8"))),
    }
}

#[track_caller]
pub fn var_opt(key: &str) -> Result<Option<String>, VarError> {
    match std::env::var(key) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(error) => Err(Error::unknown(error)
            .change_context(VarError)
            .attach_printable(format!("{key:?} has an invalid UTF-8 value"))),
    }
}

#[track_caller]
pub fn var_opt_parsed<T: FromStr>(key: &str) -> Result<Option<T>, VarError>
where
    T::Err: Context,
{
    let Some(value) = var_opt(key)? else {
        return Ok(None);
    };
    match value.parse() {
        Ok(parsed) => Ok(Some(parsed)),
        Err(error) => Err(Error::unknown(error)
            .change_context(VarError)
            .attach_printable(format!("could not parse value of {key:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::{var, var_opt, var_opt_parsed};

    #[test]
    fn should_read_present_variables() {
        std::env::set_var("__MURMUR_ENV_TEST_A__", "hello");
        assert_eq!(var("__MURMUR_ENV_TEST_A__").unwrap(), "hello");
        assert_eq!(
            var_opt("__MURMUR_ENV_TEST_A__").unwrap(),
            Some("hello".to_string()),
        );
        std::env::remove_var("__MURMUR_ENV_TEST_A__");
    }

    #[test]
    fn should_handle_missing_variables() {
        assert!(var("__MURMUR_ENV_TEST_MISSING__").is_err());
        assert_eq!(var_opt("__MURMUR_ENV_TEST_MISSING__").unwrap(), None);
        assert_eq!(
            var_opt_parsed::<u16>("__MURMUR_ENV_TEST_MISSING__").unwrap(),
            None,
        );
    }

    #[test]
    fn should_parse_typed_variables() {
        std::env::set_var("__MURMUR_ENV_TEST_B__", "8080");
        assert_eq!(
            var_opt_parsed::<u16>("__MURMUR_ENV_TEST_B__").unwrap(),
            Some(8080),
        );

        std::env::set_var("__MURMUR_ENV_TEST_B__", "not-a-number");
        assert!(var_opt_parsed::<u16>("__MURMUR_ENV_TEST_B__").is_err());
        std::env::remove_var("__MURMUR_ENV_TEST_B__");
    }
}
