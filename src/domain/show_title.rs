use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowTitle(String);

impl ShowTitle {
    /// Returns an instance of `ShowTitle` if the input is a usable title,
    /// an error message otherwise.
    ///
    /// Leading and trailing whitespace is trimmed so that the natural key
    /// `(title, genre)` does not split on stray spaces.
    pub fn parse(s: String) -> Result<ShowTitle, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("Title must not be empty".to_string());
        }
        if trimmed.graphemes(true).count() > 256 {
            return Err("Title must be at most 256 characters long".to_string());
        }
        if trimmed.chars().any(char::is_control) {
            return Err(format!("{:?} is not a valid show title", s));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl AsRef<str> for ShowTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
