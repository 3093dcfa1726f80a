use error_stack::{Context, Report};
use murmur_api_types::ErrorCategory;
use std::fmt;

use crate::ApiError;

/// Placeholder context for errors whose concrete cause has been erased
/// from the type signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoContext;

impl fmt::Display for NoContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an error occurred")
    }
}

impl std::error::Error for NoContext {}

#[must_use]
pub struct Error<C = NoContext> {
    pub(crate) category: ErrorCategory,
    pub(crate) report: Report<C>,
}

// constructors
impl<C> Error<C> {
    #[track_caller]
    pub fn new(category: ErrorCategory, context: C) -> Self
    where
        C: Context,
    {
        Self {
            category,
            report: Report::new(context),
        }
    }

    #[track_caller]
    pub fn unknown(context: C) -> Self
    where
        C: Context,
    {
        Self::new(ErrorCategory::Unknown, context)
    }
}

// getters and setters
impl<C> Error<C> {
    #[track_caller]
    pub fn attach_printable<A>(mut self, attachment: A) -> Self
    where
        A: fmt::Display + fmt::Debug + Send + Sync + 'static,
    {
        self.report = self.report.attach_printable(attachment);
        self
    }

    #[must_use]
    pub fn get_category(&self) -> &ErrorCategory {
        &self.category
    }

    pub fn category(mut self, category: ErrorCategory) -> Self {
        self.category = category;
        self
    }

    #[track_caller]
    pub fn change_context<N>(self, context: N) -> Error<N>
    where
        N: Context,
    {
        Error {
            category: self.category,
            report: self.report.change_context(context),
        }
    }

    #[track_caller]
    pub fn erase_context(self) -> Error<NoContext> {
        self.change_context(NoContext)
    }

    #[must_use]
    pub fn report(&self) -> &Report<C> {
        &self.report
    }

    /// Collapses this error into its wire form, logging the report so the
    /// diagnostics are not lost with it.
    pub fn into_api_error(self) -> ApiError {
        match &self.category {
            ErrorCategory::Unknown | ErrorCategory::Outage => {
                tracing::error!("unexpected error: {:?}", self.report);
            }
            _ => {
                tracing::debug!("api error: {:?}", self.report);
            }
        }
        ApiError::new(self.category)
    }
}

impl<C> From<Error<C>> for ApiError {
    fn from(error: Error<C>) -> Self {
        error.into_api_error()
    }
}
