use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for validating usernames
    /// Letters, digits and `@ . + - _` only
    /// - Valid: "john_doe", "user123", "jane.doe@city", "eco+warrior"
    /// - Invalid: "john doe", "user/name", "", "naïve"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[A-Za-z0-9@.+_-]+$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_regex_valid() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("user123"));
        assert!(USERNAME_REGEX.is_match("jane.doe@city"));
        assert!(USERNAME_REGEX.is_match("eco+warrior"));
        assert!(USERNAME_REGEX.is_match("a-b"));
    }

    #[test]
    fn test_username_regex_invalid() {
        assert!(!USERNAME_REGEX.is_match("john doe")); // space
        assert!(!USERNAME_REGEX.is_match("user/name")); // slash
        assert!(!USERNAME_REGEX.is_match("")); // empty
        assert!(!USERNAME_REGEX.is_match("naïve")); // non-ascii
    }
}
