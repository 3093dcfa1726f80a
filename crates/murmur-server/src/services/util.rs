//! Validation rules applied to submitted form data before any entity
//! is constructed.

use murmur_api_types::error::FormErrors;

/// Minimum length of a post's text, matching the historic post form.
pub const MIN_POST_CHARACTERS: usize = 5;

/// Validates post text: presence, the minimum of
/// [`MIN_POST_CHARACTERS`] and the configured maximum.
pub fn check_post_text(errors: &mut FormErrors, text: &str, max_characters: usize) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        errors.add("text", "This field is required");
        return;
    }

    let length = trimmed.chars().count();
    if length < MIN_POST_CHARACTERS {
        errors.add("text", "Post is too short");
    } else if length > max_characters {
        errors.add("text", "Post is too long");
    }
}

/// A comment only has to carry any text at all.
#[must_use]
pub fn is_valid_comment_text(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Usernames: non-empty, at most 150 characters, letters, digits and
/// `_`, `.`, `-` only.
#[must_use]
pub fn is_valid_username(name: &str) -> bool {
    !name.is_empty()
        && name.chars().count() <= 150
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= 8
}

#[cfg(test)]
mod tests {
    use super::*;
    use murmur_api_types::error::FormErrors;

    fn text_errors(text: &str) -> Vec<String> {
        let mut errors = FormErrors::new();
        check_post_text(&mut errors, text, 100);
        errors.entries().map(|e| e.message.clone()).collect()
    }

    #[test]
    fn should_reject_short_post_text() {
        assert_eq!(text_errors("hi"), ["Post is too short"]);
        assert_eq!(text_errors("1234"), ["Post is too short"]);
        // whitespace does not count towards the minimum
        assert_eq!(text_errors("   hi   "), ["Post is too short"]);
    }

    #[test]
    fn should_reject_empty_and_overlong_post_text() {
        assert_eq!(text_errors(""), ["This field is required"]);
        assert_eq!(text_errors("   "), ["This field is required"]);
        assert_eq!(text_errors(&"a".repeat(101)), ["Post is too long"]);
    }

    #[test]
    fn should_accept_reasonable_post_text() {
        assert!(text_errors("12345").is_empty());
        assert!(text_errors("Hello, World!").is_empty());
    }

    #[test]
    fn should_validate_comment_text() {
        assert!(is_valid_comment_text("nice post"));
        assert!(!is_valid_comment_text(""));
        assert!(!is_valid_comment_text("   "));
    }

    #[test]
    fn should_validate_usernames() {
        assert!(is_valid_username("alice"));
        assert!(is_valid_username("alice_1.dev-2"));
        assert!(!is_valid_username(""));
        assert!(!is_valid_username("alice smith"));
        assert!(!is_valid_username("@alice"));
        assert!(!is_valid_username(&"a".repeat(151)));
    }

    #[test]
    fn should_validate_passwords() {
        assert!(is_valid_password("12345678"));
        assert!(!is_valid_password("1234567"));
    }
}
