use crate::domain::{Genre, Rating, ShowTitle, ViewingStatus};

/// The `(title, genre)` pair identifying a show within a user's collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NaturalKey {
    pub title: ShowTitle,
    pub genre: Genre,
}

/// A fully validated show, ready to be attached to a user.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowDetails {
    pub title: ShowTitle,
    pub genre: Genre,
    pub rating: Rating,
    pub status: ViewingStatus,
}

/// Conditions for finding a single show. All present conditions must hold.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowLookup {
    id: Option<i32>,
    natural_key: Option<NaturalKey>,
}

impl ShowLookup {
    /// Returns `None` when no condition is given: an unconstrained lookup
    /// would match an arbitrary row.
    pub fn new(id: Option<i32>, natural_key: Option<NaturalKey>) -> Option<ShowLookup> {
        if id.is_none() && natural_key.is_none() {
            None
        } else {
            Some(ShowLookup { id, natural_key })
        }
    }

    pub fn id(&self) -> Option<i32> {
        self.id
    }

    pub fn natural_key(&self) -> Option<&NaturalKey> {
        self.natural_key.as_ref()
    }
}

impl std::fmt::Display for ShowLookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut conditions = Vec::new();
        if let Some(id) = self.id {
            conditions.push(format!("id {}", id));
        }
        if let Some(key) = &self.natural_key {
            conditions.push(format!(
                "title {:?} and genre {}",
                key.title.as_ref(),
                key.genre
            ));
        }
        f.write_str(&conditions.join(" and "))
    }
}

/// Narrowing conditions for listing the shows of one genre.
#[derive(Debug, Clone, PartialEq)]
pub struct ShowFilter {
    pub genre: Genre,
    pub id: Option<i32>,
    pub title: Option<ShowTitle>,
    pub rating: Option<f64>,
    pub status: Option<String>,
}

impl ShowFilter {
    pub fn for_genre(genre: Genre) -> ShowFilter {
        ShowFilter {
            genre,
            id: None,
            title: None,
            rating: None,
            status: None,
        }
    }
}
