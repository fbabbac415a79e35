use crate::domain::{Genre, NaturalKey, ShowFilter, ShowLookup, ShowTitle};
use crate::models::Show;
use crate::routes::{json_body, ApiError, FieldErrors};
use crate::startup::TrackerDbConn;
use anyhow::Context;
use diesel::prelude::*;
use diesel::PgConnection;
use rocket::serde::json::{self, Json};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use uuid::Uuid;

#[derive(serde::Deserialize, Debug)]
pub struct ShowLookupBody {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i32>,
    title: Option<String>,
    genre: Option<String>,
}

impl TryFrom<ShowLookupBody> for ShowLookup {
    type Error = FieldErrors;

    fn try_from(body: ShowLookupBody) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        // A title or genre on its own is not a condition.
        let natural_key = match (body.title, body.genre) {
            (Some(title), Some(genre)) => {
                let title = errors.check("title", ShowTitle::parse(title));
                let genre = errors.check("genre", Genre::parse(&genre));
                title.zip(genre).map(|(title, genre)| NaturalKey { title, genre })
            }
            _ => None,
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        match ShowLookup::new(body.id, natural_key) {
            Some(lookup) => Ok(lookup),
            None => {
                errors.push("id", "Either an id, or a title and genre, must be provided");
                Err(errors)
            }
        }
    }
}

/// Optional narrowing conditions for `GET /shows/<genre>`.
#[derive(serde::Deserialize, Debug, Default)]
pub struct ShowFilterBody {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    id: Option<i32>,
    title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    rating: Option<f64>,
    status: Option<String>,
}

impl ShowFilterBody {
    fn into_filter(self, genre: Genre) -> Result<ShowFilter, FieldErrors> {
        let mut errors = FieldErrors::default();
        let title = match self.title {
            Some(title) => errors.check("title", ShowTitle::parse(title)),
            None => None,
        };
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(ShowFilter {
            id: self.id,
            title,
            rating: self.rating,
            status: self.status,
            ..ShowFilter::for_genre(genre)
        })
    }
}

#[tracing::instrument(name = "List all shows", skip(conn), fields(request_id = %Uuid::new_v4()))]
#[get("/")]
pub async fn all_shows(conn: TrackerDbConn) -> Result<Json<Vec<Show>>, ApiError> {
    let shows = conn
        .run(|c| load_all_shows(c))
        .await
        .context("Failed to load shows from the database.")?;
    Ok(Json(shows))
}

#[tracing::instrument(
    name = "Look up a single show",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4())
)]
#[get("/show", data = "<body>")]
pub async fn show_by_lookup(
    body: Result<Json<ShowLookupBody>, json::Error<'_>>,
    conn: TrackerDbConn,
) -> Result<Json<Show>, ApiError> {
    let lookup: ShowLookup = json_body(body)?.try_into()?;
    let query = lookup.clone();
    let show = conn
        .run(move |c| find_show(c, &query))
        .await
        .context("Failed to look up a show in the database.")?
        .ok_or_else(|| ApiError::NotFound(format!("No show exists for {}", lookup)))?;
    Ok(Json(show))
}

#[tracing::instrument(
    name = "List the shows of a genre",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4())
)]
#[get("/<genre>", data = "<body>", rank = 2)]
pub async fn shows_by_genre(
    genre: &str,
    body: Result<Json<ShowFilterBody>, json::Error<'_>>,
    conn: TrackerDbConn,
) -> Result<Json<Vec<Show>>, ApiError> {
    let genre = Genre::parse(genre).map_err(|e| ApiError::invalid("genre", e))?;
    let body = match body {
        Ok(Json(body)) => body,
        // No body at all means no extra conditions.
        Err(json::Error::Parse(raw, _)) if raw.trim().is_empty() => ShowFilterBody::default(),
        Err(e) => return Err(e.into()),
    };
    let filter = body.into_filter(genre)?;
    let shows = conn
        .run(move |c| filter_shows(c, &filter))
        .await
        .context("Failed to filter shows in the database.")?;
    if shows.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No shows exist for genre {}",
            genre
        )));
    }
    Ok(Json(shows))
}

#[tracing::instrument(name = "Load all shows", skip(conn))]
fn load_all_shows(conn: &mut PgConnection) -> QueryResult<Vec<Show>> {
    use crate::schema::shows;
    shows::table.order(shows::id).load(conn)
}

#[tracing::instrument(name = "Find a show matching every lookup condition", skip(conn))]
fn find_show(conn: &mut PgConnection, lookup: &ShowLookup) -> QueryResult<Option<Show>> {
    use crate::schema::shows;

    let mut query = shows::table.into_boxed();
    if let Some(id) = lookup.id() {
        query = query.filter(shows::id.eq(id));
    }
    if let Some(key) = lookup.natural_key() {
        query = query
            .filter(shows::title.eq(key.title.as_ref()))
            .filter(shows::genre.eq(key.genre.as_ref()));
    }
    query.order(shows::id).first(conn).optional()
}

#[tracing::instrument(name = "Filter shows", skip(conn))]
fn filter_shows(conn: &mut PgConnection, filter: &ShowFilter) -> QueryResult<Vec<Show>> {
    use crate::schema::shows;

    let mut query = shows::table
        .filter(shows::genre.eq(filter.genre.as_ref()))
        .into_boxed();
    if let Some(id) = filter.id {
        query = query.filter(shows::id.eq(id));
    }
    if let Some(title) = &filter.title {
        query = query.filter(shows::title.eq(title.as_ref()));
    }
    if let Some(rating) = filter.rating {
        query = query.filter(shows::rating.eq(rating));
    }
    if let Some(status) = &filter.status {
        query = query.filter(shows::status.eq(status.as_str()));
    }
    query.order(shows::id).load(conn)
}
