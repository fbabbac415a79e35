use chrono::Utc;
use diesel::prelude::*;
use diesel::{Connection, PgConnection};
use once_cell::sync::Lazy;
use secrecy::ExposeSecret;
use tv_tracker::configuration::{get_configuration, Settings};
use tv_tracker::models::{NewShow, NewUser, Show, User};
use tv_tracker::startup::Application;
use tv_tracker::telemetry::{get_subscriber, init_subscriber};
use uuid::Uuid;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".into();
    let subscriber_name = "test".into();
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber).expect("Failed to initialise telemetry.");
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).expect("Failed to initialise telemetry.");
    }
});

pub struct TestApp {
    pub address: String,
    pub db_connection: PgConnection,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// GET with a JSON body, the way the lookup routes expect their input.
    pub async fn get_with_body(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get_with_raw_body(&self, path: &str, body: &'static str) -> reqwest::Response {
        self.api_client
            .get(&format!("{}{}", &self.address, path))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn put_user_show(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .put(&format!("{}/users/user/shows", &self.address))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn insert_user(&mut self, username: &str, password: &str) -> User {
        use tv_tracker::schema::users;
        diesel::insert_into(users::table)
            .values(&NewUser { username, password })
            .get_result(&mut self.db_connection)
            .expect("Failed to insert test user.")
    }

    pub fn insert_show(
        &mut self,
        user_id: Option<i32>,
        title: &str,
        genre: &str,
        rating: f64,
        status: &str,
    ) -> Show {
        use tv_tracker::schema::shows;
        diesel::insert_into(shows::table)
            .values(&NewShow {
                title,
                genre,
                rating,
                status,
                user_id,
                updated_at: Utc::now(),
            })
            .get_result(&mut self.db_connection)
            .expect("Failed to insert test show.")
    }

    pub fn shows_owned_by(&mut self, user_id: i32) -> Vec<Show> {
        use tv_tracker::schema::shows;
        shows::table
            .filter(shows::user_id.eq(user_id))
            .order(shows::id)
            .load(&mut self.db_connection)
            .expect("Failed to load shows.")
    }

    pub fn all_shows(&mut self) -> Vec<Show> {
        use tv_tracker::schema::shows;
        shows::table
            .order(shows::id)
            .load(&mut self.db_connection)
            .expect("Failed to load shows.")
    }
}

pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let configuration = {
        let mut c = get_configuration().expect("Failed to read configuration.");
        c.application.port = None;
        c.database.database_name = Uuid::new_v4().to_string();
        c
    };

    create_database(&configuration);

    let Application { server, port } = Application::build(&configuration)
        .await
        .expect("Failed to build application.");
    let _ = tokio::spawn(server.launch());
    let port = port.get().await.expect("The server did not report its port.");

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        db_connection: connect_to_database(&configuration),
        api_client: reqwest::Client::new(),
    }
}

/// Tables are created by the migrations the application runs on ignition.
fn create_database(configuration: &Settings) {
    let mut connection = PgConnection::establish(
        configuration
            .database
            .connection_string_without_database()
            .expose_secret(),
    )
    .expect("Failed to connect to Postgres.");

    diesel::sql_query(format!(
        "CREATE DATABASE \"{}\"",
        configuration.database.database_name
    ))
    .execute(&mut connection)
    .expect("Failed to create database.");
}

fn connect_to_database(configuration: &Settings) -> PgConnection {
    PgConnection::establish(configuration.database.connection_string().expose_secret())
        .expect("Failed to connect to Postgres.")
}

pub async fn json_body(response: reqwest::Response) -> serde_json::Value {
    response
        .json()
        .await
        .expect("Response body was not valid JSON.")
}

pub fn assert_is_json(response: &reqwest::Response) {
    let content_type = response
        .headers()
        .get("content-type")
        .expect("Missing content-type header.")
        .to_str()
        .unwrap();
    assert!(
        content_type.starts_with("application/json"),
        "Unexpected content-type {}",
        content_type
    );
}
