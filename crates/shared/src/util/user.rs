use std::sync::OnceLock;

use regex::Regex;

use crate::konst::GUEST_USER_PATTERN;

fn user_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(GUEST_USER_PATTERN).expect("user pattern is valid"))
}

/// Whether `name` is acceptable as the guest login user: lowercase letter
/// first, then lowercase letters, digits or dashes.
pub fn is_valid_user(name: &str) -> bool {
    user_pattern().is_match(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_lowercase_names() {
        assert!(is_valid_user("ken"));
        assert!(is_valid_user("deploy-2"));
        assert!(is_valid_user("a"));
    }

    #[test]
    fn rejects_uppercase_and_leading_digits() {
        assert!(!is_valid_user("Root"));
        assert!(!is_valid_user("1admin"));
        assert!(!is_valid_user(""));
        assert!(!is_valid_user("ops user"));
    }
}
