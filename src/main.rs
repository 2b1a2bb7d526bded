use salud::{configuration::Settings, startup::Application, telemetry::{get_subscriber, init_subscriber}};

#[actix_web::main]
async fn main() -> anyhow::Result<()>{
    let subscriber = get_subscriber("salud".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let config = Settings::get()?;

    let application = Application::build(config).await?;
    tracing::info!(host = %application.host, port = application.port, "Salud is listening");
    application.run_until_stopped().await?;
    Ok(())
}
