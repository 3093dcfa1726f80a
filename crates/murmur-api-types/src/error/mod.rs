mod serialization;

#[cfg(feature = "axum")]
mod axum;

/// A machine-readable error served by every Murmur API endpoint.
///
/// Errors serialize to a flat object carrying a `code`, an optional
/// `subcode` for categories with more than one cause, an optional
/// human-readable `message` and, for form validation failures, an
/// `errors` map from field name to its messages.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Error {
    pub category: ErrorCategory,
    pub message: Option<String>,
}

impl Error {
    pub fn new(category: ErrorCategory) -> Self {
        Self {
            category,
            message: None,
        }
    }

    pub fn unknown() -> Self {
        Self::new(ErrorCategory::Unknown)
    }

    pub fn message(self, message: impl Into<String>) -> Self {
        Self {
            category: self.category,
            message: Some(message.into()),
        }
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        match &self.category {
            ErrorCategory::Unknown => "unknown",
            ErrorCategory::InvalidRequest => "invalid_request",
            ErrorCategory::NotFound => "not_found",
            ErrorCategory::AccessDenied => "access_denied",
            ErrorCategory::InvalidForm(..) => "invalid_form",
            ErrorCategory::LoginFailed(..) => "login_failed",
            ErrorCategory::SignupFailed(..) => "signup_failed",
            ErrorCategory::Outage => "outage",
        }
    }

    #[must_use]
    pub fn subcode(&self) -> Option<&'static str> {
        match &self.category {
            ErrorCategory::LoginFailed(LoginFailed::InvalidCredentials) => {
                Some("invalid_credentials")
            }
            ErrorCategory::SignupFailed(subcode) => Some(match subcode {
                SignupFailed::UsernameTaken => "username_taken",
                SignupFailed::EmailTaken => "email_taken",
                SignupFailed::InvalidUsername => "invalid_username",
                SignupFailed::WeakPassword => "weak_password",
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorCategory {
    /// We don't know what is the cause of this error but the full report
    /// is logged on the server side.
    Unknown,
    InvalidRequest,
    NotFound,
    AccessDenied,

    /// A submitted form did not pass validation. The offending fields and
    /// their messages are echoed back so the form can be rendered again.
    InvalidForm(FormErrors),

    LoginFailed(LoginFailed),
    SignupFailed(SignupFailed),

    /// One of our services is down and the request cannot be served at
    /// the moment, such as when the database is unreachable.
    Outage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginFailed {
    InvalidCredentials,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupFailed {
    UsernameTaken,
    EmailTaken,
    InvalidUsername,
    WeakPassword,
}

/// Validation messages collected per form field, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    entries: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FormErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.entries.push(FieldError {
            field,
            message: message.into(),
        });
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &FieldError> {
        self.entries.iter()
    }

    /// Turns non-empty errors into the API error they are reported as.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::new(ErrorCategory::InvalidForm(self)))
        }
    }
}
