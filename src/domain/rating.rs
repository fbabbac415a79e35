/// A score out of ten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rating(f64);

impl Rating {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 10.0;

    pub fn parse(value: f64) -> Result<Rating, String> {
        if value.is_finite() && validator::validate_range(value, Some(Self::MIN), Some(Self::MAX))
        {
            Ok(Self(value))
        } else {
            Err(format!(
                "Rating must be a number between {} and {}, got {}",
                Self::MIN,
                Self::MAX,
                value
            ))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
