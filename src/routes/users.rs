use crate::domain::{parse_alphanumeric, Credentials};
use crate::models::User;
use crate::routes::{json_body, ApiError, FieldErrors};
use crate::startup::TrackerDbConn;
use anyhow::Context;
use diesel::prelude::*;
use diesel::PgConnection;
use rocket::serde::json::{self, Json};
use secrecy::{ExposeSecret, Secret};
use uuid::Uuid;

#[derive(serde::Deserialize)]
pub struct CredentialsBody {
    username: Option<String>,
    password: Option<Secret<String>>,
}

impl TryFrom<CredentialsBody> for Credentials {
    type Error = FieldErrors;

    fn try_from(body: CredentialsBody) -> Result<Self, Self::Error> {
        let mut errors = FieldErrors::default();
        let username = errors
            .require("username", body.username)
            .and_then(|username| errors.check("username", parse_alphanumeric("username", &username)));
        let password = errors
            .require("password", body.password)
            .and_then(|password| {
                errors.check(
                    "password",
                    parse_alphanumeric("password", password.expose_secret()),
                )
            });
        match (username, password) {
            (Some(username), Some(password)) if errors.is_empty() => Ok(Credentials {
                username,
                password: Secret::new(password),
            }),
            _ => Err(errors),
        }
    }
}

#[tracing::instrument(name = "List all users", skip(conn), fields(request_id = %Uuid::new_v4()))]
#[get("/")]
pub async fn all_users(conn: TrackerDbConn) -> Result<Json<Vec<User>>, ApiError> {
    let users = conn
        .run(|c| load_all_users(c))
        .await
        .context("Failed to load users from the database.")?;
    Ok(Json(users))
}

#[tracing::instrument(
    name = "Find a user by credentials",
    skip(body, conn),
    fields(request_id = %Uuid::new_v4(), username = tracing::field::Empty)
)]
#[get("/user", data = "<body>")]
pub async fn user_by_credentials(
    body: Result<Json<CredentialsBody>, json::Error<'_>>,
    conn: TrackerDbConn,
) -> Result<Json<User>, ApiError> {
    let credentials: Credentials = json_body(body)?.try_into()?;
    tracing::Span::current().record("username", &tracing::field::display(&credentials.username));
    let username = credentials.username.clone();
    let user = conn
        .run(move |c| find_user_by_credentials(c, &credentials))
        .await
        .context("Failed to look up a user in the database.")?
        .ok_or_else(|| {
            ApiError::NotFound(format!(
                "No user has username {:?} and the given password",
                username
            ))
        })?;
    Ok(Json(user))
}

#[tracing::instrument(name = "Load all users", skip(conn))]
fn load_all_users(conn: &mut PgConnection) -> QueryResult<Vec<User>> {
    use crate::schema::users;
    users::table.order(users::id).load(conn)
}

#[tracing::instrument(name = "Query user by username and password", skip(conn, credentials))]
fn find_user_by_credentials(
    conn: &mut PgConnection,
    credentials: &Credentials,
) -> QueryResult<Option<User>> {
    use crate::schema::users;
    users::table
        .filter(users::username.eq(credentials.username.as_str()))
        .filter(users::password.eq(credentials.password()))
        .order(users::id)
        .first(conn)
        .optional()
}

#[tracing::instrument(name = "Query user by id", skip(conn))]
pub fn find_user_by_id(conn: &mut PgConnection, user_id: i32) -> QueryResult<Option<User>> {
    use crate::schema::users;
    users::table.find(user_id).first(conn).optional()
}
