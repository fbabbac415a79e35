use anyhow::Context;
use tv_tracker::configuration::get_configuration;
use tv_tracker::startup::Application;
use tv_tracker::telemetry::{get_subscriber, init_subscriber};

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber("tv_tracker".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber)?;

    let configuration = get_configuration().context("Failed to read configuration.")?;
    let application = Application::build(&configuration).await?;
    application.run_until_stopped().await
}
