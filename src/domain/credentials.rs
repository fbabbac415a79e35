use secrecy::{ExposeSecret, Secret};

/// A username/password pair taken from a request body.
///
/// Both parts must be non-empty and ASCII alphanumeric. The password is
/// compared verbatim against the stored value.
#[derive(Debug)]
pub struct Credentials {
    pub username: String,
    pub password: Secret<String>,
}

impl Credentials {
    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

pub fn parse_alphanumeric(field: &str, value: &str) -> Result<String, String> {
    if value.is_empty() {
        return Err(format!("{} must not be empty", field));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(format!("{} must only contain letters and digits", field));
    }
    Ok(value.to_string())
}
