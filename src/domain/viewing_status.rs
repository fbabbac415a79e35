use unicode_segmentation::UnicodeSegmentation;

/// Free-form description of how far along a user is with a show,
/// e.g. "watching" or "finished".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewingStatus(String);

impl ViewingStatus {
    pub fn parse(s: String) -> Result<ViewingStatus, String> {
        let is_empty_or_whitespace = s.trim().is_empty();
        let is_too_long = s.graphemes(true).count() > 256;
        if is_empty_or_whitespace || is_too_long {
            Err(format!("{:?} is not a valid viewing status", s))
        } else {
            Ok(Self(s))
        }
    }
}

impl AsRef<str> for ViewingStatus {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
