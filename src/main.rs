//! src/main.rs
use personal_site::configuration::get_configuration;
use personal_site::startup::Application;
use personal_site::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let subscriber = get_subscriber("personal-site".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let configuration = get_configuration().expect("Failed to read configuration.");
    let application = Application::build(&configuration).await?;
    application.run_until_stopped().await?;
    Ok(())
}
