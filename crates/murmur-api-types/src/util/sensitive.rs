use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Deref, DerefMut};

/// Wrapper for values that must never show up in logs or debug output,
/// such as credentials and other user-submitted request data.
///
/// It behaves like the value it wraps except that formatting it with
/// `{:?}` prints a placeholder.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Sensitive<T>(T);

impl<T> Sensitive<T> {
    pub fn new(value: T) -> Self {
        Self(value)
    }

    #[must_use]
    pub fn value(&self) -> &T {
        &self.0
    }

    pub fn value_mut(&mut self) -> &mut T {
        &mut self.0
    }

    #[must_use]
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Sensitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[sensitive]")
    }
}

impl<T> Deref for Sensitive<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Sensitive<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T> From<T> for Sensitive<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::Sensitive;

    #[test]
    fn should_redact_debug_output() {
        let secret = Sensitive::new("hunter2");
        assert_eq!(format!("{secret:?}"), "[sensitive]");
    }

    #[test]
    fn should_behave_like_the_inner_value() {
        let wrapped = Sensitive::new(String::from("alice"));
        assert_eq!(wrapped.len(), 5);
        assert_eq!(*wrapped.value(), "alice");
        assert_eq!(wrapped.into_inner(), "alice");
    }
}
