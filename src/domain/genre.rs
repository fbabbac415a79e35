use std::fmt;

/// The fixed set of categories a show can be filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Comedy,
    Drama,
    Horror,
    Sitcom,
}

impl Genre {
    pub const ALL: [Genre; 4] = [Genre::Comedy, Genre::Drama, Genre::Horror, Genre::Sitcom];

    /// Matches `s` against the allow-list, ignoring case.
    pub fn parse(s: &str) -> Result<Genre, String> {
        Self::ALL
            .iter()
            .copied()
            .find(|genre| genre.as_ref().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Genre must be one of the following: {}",
                    Self::ALL
                        .iter()
                        .map(|genre| genre.as_ref())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            })
    }
}

impl AsRef<str> for Genre {
    fn as_ref(&self) -> &str {
        match self {
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Horror => "Horror",
            Genre::Sitcom => "Sitcom",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}
