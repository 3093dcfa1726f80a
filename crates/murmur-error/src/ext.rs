//! Extension traits that lift plain `Result`s into [`Error`]-carrying
//! ones and operate on results that are already wrapped.
//!
//! [`ResultExt`] applies to results whose error type is any ordinary
//! error (`sqlx::Error`, `std::io::Error`, ...); [`ErrorResultExt`]
//! applies to `Result<T, Error<C>>`.

use error_stack::Context;
use std::fmt;

use crate::error::{Error, NoContext};
use crate::ApiErrorCategory;

pub trait ResultExt<T, E> {
    /// Wraps the error and names the failed operation `context`.
    fn change_context<N>(self, context: N) -> Result<T, Error<N>>
    where
        N: Context;

    /// Wraps the error without naming a specific operation.
    fn erase_context(self) -> Result<T, Error<NoContext>>;
}

impl<T, E> ResultExt<T, E> for Result<T, E>
where
    E: Context,
{
    #[track_caller]
    fn change_context<N>(self, context: N) -> Result<T, Error<N>>
    where
        N: Context,
    {
        self.map_err(|error| Error::unknown(error).change_context(context))
    }

    #[track_caller]
    fn erase_context(self) -> Result<T, Error<NoContext>> {
        self.map_err(|error| Error::unknown(error).erase_context())
    }
}

pub trait ErrorResultExt<T, C> {
    fn attach_printable<A>(self, attachment: A) -> Result<T, Error<C>>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static;

    fn attach_printable_lazy<A, F>(self, attachment: F) -> Result<T, Error<C>>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
        F: FnOnce() -> A;

    fn change_context<N>(self, context: N) -> Result<T, Error<N>>
    where
        N: Context;

    fn erase_context(self) -> Result<T, Error<NoContext>>;

    /// Overrides the API category the error will surface as.
    fn category(self, category: ApiErrorCategory) -> Result<T, Error<C>>;
}

impl<T, C> ErrorResultExt<T, C> for Result<T, Error<C>> {
    #[track_caller]
    fn attach_printable<A>(self, attachment: A) -> Result<T, Error<C>>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.map_err(|error| error.attach_printable(attachment))
    }

    #[track_caller]
    fn attach_printable_lazy<A, F>(self, attachment: F) -> Result<T, Error<C>>
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
        F: FnOnce() -> A,
    {
        self.map_err(|error| error.attach_printable(attachment()))
    }

    #[track_caller]
    fn change_context<N>(self, context: N) -> Result<T, Error<N>>
    where
        N: Context,
    {
        self.map_err(|error| error.change_context(context))
    }

    #[track_caller]
    fn erase_context(self) -> Result<T, Error<NoContext>> {
        self.map_err(Error::erase_context)
    }

    fn category(self, category: ApiErrorCategory) -> Result<T, Error<C>> {
        self.map_err(|error| error.category(category))
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorResultExt, ResultExt};
    use crate::{ApiError, ApiErrorCategory};
    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("could not do the thing")]
    struct DoThingError;

    fn fallible() -> Result<(), std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "boom"))
    }

    #[test]
    fn should_lift_plain_errors() {
        let error = fallible().change_context(DoThingError).unwrap_err();
        assert!(matches!(
            error.get_category(),
            ApiErrorCategory::Unknown
        ));

        let api_error = ApiError::from(error);
        assert_eq!(api_error, ApiError::unknown());
    }

    #[test]
    fn should_override_the_category() {
        let error = fallible()
            .change_context(DoThingError)
            .category(ApiErrorCategory::Outage)
            .unwrap_err();

        assert!(matches!(error.get_category(), ApiErrorCategory::Outage));
    }

    #[test]
    fn should_keep_the_category_across_context_changes() {
        #[derive(Debug, Error)]
        #[error("outer operation failed")]
        struct OuterError;

        let error = fallible()
            .erase_context()
            .category(ApiErrorCategory::NotFound)
            .change_context(OuterError)
            .unwrap_err();

        assert!(matches!(error.get_category(), ApiErrorCategory::NotFound));
    }
}
