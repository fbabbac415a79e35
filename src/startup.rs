use crate::catchers::*;
use crate::configuration::Settings;
use crate::port_saver::{self, Port};
use crate::routes::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness};
use rocket::fairing::AdHoc;
use rocket::{Build, Ignite, Rocket};
use rocket_sync_db_pools::database;
use secrecy::ExposeSecret;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[database("tv_tracker")]
pub struct TrackerDbConn(diesel::PgConnection);

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: Port,
}

impl Application {
    pub async fn build(configuration: &Settings) -> anyhow::Result<Application> {
        let (port_saver, port) = port_saver::create_pair();
        let figment = rocket::Config::figment()
            .merge(("address", configuration.application.host))
            .merge(("port", configuration.application.port.unwrap_or(0)))
            .merge((
                "databases.tv_tracker.url",
                configuration.database.connection_string().expose_secret().as_str(),
            ));

        let server = rocket::custom(figment)
            .attach(TrackerDbConn::fairing())
            .attach(AdHoc::try_on_ignite(
                "Database Migrations",
                run_migrations,
            ))
            .attach(port_saver)
            .mount("/", routes![health_check])
            .mount("/shows", routes![all_shows, show_by_lookup, shows_by_genre])
            .mount(
                "/users",
                routes![all_users, user_by_credentials, shows_of_user, upsert_user_show],
            )
            .register(
                "/",
                catchers![
                    bad_request,
                    not_found,
                    unprocessable_entity_to_bad_request,
                    internal_error,
                    service_unavailable
                ],
            )
            .ignite()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to ignite the server: {}", e))?;

        Ok(Application { server, port })
    }

    pub async fn run_until_stopped(self) -> anyhow::Result<()> {
        self.server
            .launch()
            .await
            .map(drop)
            .map_err(|e| anyhow::anyhow!("The server stopped with an error: {}", e))
    }
}

async fn run_migrations(rocket: Rocket<Build>) -> Result<Rocket<Build>, Rocket<Build>> {
    let conn = match TrackerDbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            tracing::error!("No database connection available to run migrations");
            return Err(rocket);
        }
    };
    let applied = conn
        .run(|c| {
            c.run_pending_migrations(MIGRATIONS)
                .map(|versions| versions.len())
                .map_err(|e| e.to_string())
        })
        .await;
    match applied {
        Ok(count) => {
            tracing::info!(count, "Applied pending database migrations");
            Ok(rocket)
        }
        Err(error) => {
            tracing::error!(%error, "Failed to run database migrations");
            Err(rocket)
        }
    }
}
