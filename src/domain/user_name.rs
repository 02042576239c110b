//! src/domain/user_name.rs
use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone)]
pub struct UserName(String);

impl UserName {
    /// Returns `Ok(UserName)` if the input satisfies all our validation
    /// constraints on usernames, `Err(String)` otherwise.
    pub fn parse(name: String) -> Result<Self, String> {
        let is_empty_or_whitespace = name.trim().is_empty();
        // Graphemes, not bytes: `å` counts as one character.
        let length = name.graphemes(true).count();
        let is_too_short = length < 4;
        let is_too_long = length > 100;
        let forbidden_characters = ['/', '(', ')', '"', '<', '>', '\\', '{', '}'];
        let contains_forbidden_characters = name.chars().any(|g| forbidden_characters.contains(&g));
        if is_empty_or_whitespace || is_too_short || is_too_long || contains_forbidden_characters {
            Err("The username must be between 4 and 100 characters.".to_string())
        } else {
            Ok(Self(name))
        }
    }
}

impl AsRef<str> for UserName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
