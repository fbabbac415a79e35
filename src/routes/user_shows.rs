use crate::domain::{Genre, Rating, ShowDetails, ShowTitle, ViewingStatus};
use crate::models::{NewShow, Show};
use crate::routes::{find_user_by_id, json_body, ApiError, FieldErrors};
use crate::startup::TrackerDbConn;
use anyhow::Context;
use chrono::Utc;
use diesel::prelude::*;
use diesel::PgConnection;
use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::{self, Json};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use uuid::Uuid;

#[derive(serde::Deserialize, Debug)]
pub struct UserIdBody {
    #[serde(
        default,
        alias = "userId",
        deserialize_with = "deserialize_option_number_from_string"
    )]
    id: Option<i32>,
}

#[derive(serde::Deserialize, Debug)]
pub struct UpsertShowBody {
    #[serde(
        default,
        alias = "userId",
        deserialize_with = "deserialize_option_number_from_string"
    )]
    id: Option<i32>,
    show: Option<ShowBody>,
}

#[derive(serde::Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct ShowBody {
    title: Option<String>,
    genre: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    rating: Option<f64>,
    status: Option<String>,
}

/// A validated request to attach a show to a user.
#[derive(Debug)]
pub struct ShowAssignment {
    pub user_id: i32,
    pub details: ShowDetails,
}

fn user_id_from(errors: &mut FieldErrors, id: Option<i32>) -> Option<i32> {
    errors.require("id", id)
}

impl TryFrom<UpsertShowBody> for ShowAssignment {
    type Error = FieldErrors;

    fn try_from(body: UpsertShowBody) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let user_id = user_id_from(&mut errors, body.id);
        let details = match errors.require("show", body.show) {
            Some(show) => show_details_from(&mut errors, show),
            None => None,
        };
        match (user_id, details) {
            (Some(user_id), Some(details)) if errors.is_empty() => {
                Ok(ShowAssignment { user_id, details })
            }
            _ => Err(errors),
        }
    }
}

fn show_details_from(errors: &mut FieldErrors, show: ShowBody) -> Option<ShowDetails> {
    let title = errors
        .require("show.title", show.title)
        .and_then(|title| errors.check("show.title", ShowTitle::parse(title)));
    let genre = errors
        .require("show.genre", show.genre)
        .and_then(|genre| errors.check("show.genre", Genre::parse(&genre)));
    let rating = errors
        .require("show.rating", show.rating)
        .and_then(|rating| errors.check("show.rating", Rating::parse(rating)));
    let status = errors
        .require("show.status", show.status)
        .and_then(|status| errors.check("show.status", ViewingStatus::parse(status)));
    Some(ShowDetails {
        title: title?,
        genre: genre?,
        rating: rating?,
        status: status?,
    })
}

#[tracing::instrument(
    name = "List the shows of a user",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4(), user_id = tracing::field::Empty)
)]
#[get("/user/shows", data = "<body>")]
pub async fn shows_of_user(
    body: Result<Json<UserIdBody>, json::Error<'_>>,
    conn: TrackerDbConn,
) -> Result<Json<Vec<Show>>, ApiError> {
    let mut errors = FieldErrors::default();
    let user_id = match user_id_from(&mut errors, json_body(body)?.id) {
        Some(user_id) => user_id,
        None => return Err(errors.into()),
    };
    tracing::Span::current().record("user_id", &user_id);

    let shows = conn
        .run(move |c| find_shows_of_user(c, user_id))
        .await
        .context("Failed to load the shows of a user from the database.")?
        .ok_or_else(|| ApiError::NotFound(format!("No user has id {}", user_id)))?;
    if shows.is_empty() {
        return Err(ApiError::NotFound(format!(
            "User {} has no shows",
            user_id
        )));
    }
    Ok(Json(shows))
}

#[tracing::instrument(
    name = "Add or update a show for a user",
    skip(body, conn),
    fields(
        request_id = %Uuid::new_v4(),
        user_id = tracing::field::Empty,
        show_title = tracing::field::Empty,
        show_genre = tracing::field::Empty
    )
)]
#[put("/user/shows", data = "<body>")]
pub async fn upsert_user_show(
    body: Result<Json<UpsertShowBody>, json::Error<'_>>,
    conn: TrackerDbConn,
) -> Result<status::Custom<Json<Show>>, ApiError> {
    let assignment: ShowAssignment = json_body(body)?.try_into()?;
    let span = tracing::Span::current();
    span.record("user_id", &assignment.user_id);
    span.record(
        "show_title",
        &tracing::field::display(assignment.details.title.as_ref()),
    );
    span.record(
        "show_genre",
        &tracing::field::display(assignment.details.genre),
    );

    let user_id = assignment.user_id;
    let show = conn
        .run(move |c| assign_show(c, &assignment))
        .await
        .context("Failed to store a show for a user.")?
        .ok_or_else(|| ApiError::NotFound(format!("No user has id {}", user_id)))?;
    Ok(status::Custom(Status::Created, Json(show)))
}

/// `None` when the user does not exist.
#[tracing::instrument(name = "Query shows by owner", skip(conn))]
fn find_shows_of_user(conn: &mut PgConnection, user_id: i32) -> QueryResult<Option<Vec<Show>>> {
    use crate::schema::shows;

    let user = match find_user_by_id(conn, user_id)? {
        Some(user) => user,
        None => return Ok(None),
    };
    shows::table
        .filter(shows::user_id.eq(user.id))
        .order(shows::id)
        .load(conn)
        .map(Some)
}

/// Updates the user's show with the same title and genre, or creates it.
/// `None` when the user does not exist.
#[tracing::instrument(name = "Upsert show for user", skip(conn))]
fn assign_show(
    conn: &mut PgConnection,
    assignment: &ShowAssignment,
) -> QueryResult<Option<Show>> {
    conn.transaction(|conn| {
        if find_user_by_id(conn, assignment.user_id)?.is_none() {
            return Ok(None);
        }
        upsert_show(conn, assignment.user_id, &assignment.details).map(Some)
    })
}

fn upsert_show(conn: &mut PgConnection, user_id: i32, details: &ShowDetails) -> QueryResult<Show> {
    use crate::schema::shows;
    use diesel::upsert::excluded;

    diesel::insert_into(shows::table)
        .values(&NewShow {
            title: details.title.as_ref(),
            genre: details.genre.as_ref(),
            rating: details.rating.value(),
            status: details.status.as_ref(),
            user_id: Some(user_id),
            updated_at: Utc::now(),
        })
        .on_conflict((shows::user_id, shows::title, shows::genre))
        .do_update()
        .set((
            shows::rating.eq(excluded(shows::rating)),
            shows::status.eq(excluded(shows::status)),
            shows::updated_at.eq(excluded(shows::updated_at)),
        ))
        .get_result(conn)
}
