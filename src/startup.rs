use std::{net::TcpListener, time::Duration};

use actix_web::{dev::Server, error::{JsonPayloadError, PathError, QueryPayloadError}, http::StatusCode, web, App, HttpRequest, HttpServer};
use anyhow::Context;
use diesel::{r2d2::ConnectionManager, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use r2d2::Pool;
use tracing_actix_web::TracingLogger;

use crate::{
    auth::{AdminCredentials, AdminGate, Tokenizer},
    configuration::{DatabaseSettings, Settings},
    domain::EmailAddress,
    email_client::EmailClient,
    email_templates::EmailTemplates,
    notifications::{Notifier, StaticAssets},
    routes::*,
    utils::{json_error_into, DbPool}
};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

// Whether the admin cookie carries the Secure attribute
#[derive(Debug, Clone, Copy)]
pub struct CookieSecurity(pub bool);

// How often the dashboard client should re-fetch, in seconds
#[derive(Debug, Clone, Copy)]
pub struct RefreshInterval(pub u64);

pub struct Application{
    pub host: String,
    pub port: u16,
    pub server: Server
}

impl Application {
    /// Binds the listener (port 0 picks a free one), prepares the database
    /// and wires every route. The server still has to be awaited.
    pub async fn build(settings: Settings) -> Result<Application, anyhow::Error>{
        let listener = TcpListener::bind((settings.application.host.as_str(), settings.application.port))
            .context("Failed to bind address")?;
        let port = listener.local_addr()?.port();

        let pool = get_connection_pool(&settings.database)?;
        run_migrations(&pool)?;

        let sender = EmailAddress::parse(settings.email.sender.clone())
            .map_err(|e| anyhow::anyhow!(e))
            .context("Invalid sender email")?;

        let restaurant_recipient = match settings.email.restaurant_recipient.clone() {
            Some(recipient) => EmailAddress::parse(recipient)
                .map_err(|e| anyhow::anyhow!(e))
                .context("Invalid restaurant recipient email")?,
            None => sender.clone()
        };

        let email_client = EmailClient::new(
            settings.email.api_uri.clone(),
            sender,
            settings.email.authorization_token.clone(),
            settings.email.timeout_secs
        )
        .context("Failed to build email client")?;

        let templates = EmailTemplates::new().context("Failed to load email templates")?;

        let notifier = Notifier::new(
            email_client,
            templates,
            StaticAssets::new(settings.application.static_dir.clone()),
            settings.application.base_url.clone(),
            restaurant_recipient
        );

        let credentials = AdminCredentials::from_settings(&settings.admin)?;
        let tokenizer = Tokenizer::new(&settings.jwt);

        let server = run(
            listener,
            pool,
            notifier,
            credentials,
            tokenizer,
            CookieSecurity(settings.application.secure_cookies),
            RefreshInterval(settings.dashboard.refresh_interval_secs)
        )?;

        Ok(Application{
            host: settings.application.host,
            port,
            server
        })
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error>{
        self.server.await
    }
}

pub fn get_connection_pool(settings: &DatabaseSettings) -> Result<DbPool, anyhow::Error>{
    let manager = ConnectionManager::<PgConnection>::new(settings.get_database_table_url());

    Pool::builder()
        .max_size(settings.max_connections)
        .connection_timeout(Duration::from_secs(5))
        .build(manager)
        .context("Failed to build connection pool")
}

pub fn run_migrations(pool: &DbPool) -> Result<(), anyhow::Error>{
    let mut conn = pool.get().context("Failed to get connection for migrations")?;

    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to run migrations")?;

    Ok(())
}

// Body and query parse failures answer with the same { "error": ... } shape
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            json_error_into(StatusCode::BAD_REQUEST, err.to_string())
        })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
            json_error_into(StatusCode::BAD_REQUEST, err.to_string())
        })
}

// Malformed ids in the path are a client error, not a missing route
fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err: PathError, _req: &HttpRequest| {
            json_error_into(StatusCode::BAD_REQUEST, err.to_string())
        })
}

fn run(
    listener: TcpListener,
    pool: DbPool,
    notifier: Notifier,
    credentials: AdminCredentials,
    tokenizer: Tokenizer,
    cookie_security: CookieSecurity,
    refresh_interval: RefreshInterval
) -> Result<Server, anyhow::Error>{
    let pool = web::Data::new(pool);
    let notifier = web::Data::new(notifier);
    let credentials = web::Data::new(credentials);
    let tokenizer = web::Data::new(tokenizer);
    let cookie_security = web::Data::new(cookie_security);
    let refresh_interval = web::Data::new(refresh_interval);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .app_data(pool.clone())
            .app_data(notifier.clone())
            .app_data(credentials.clone())
            .app_data(tokenizer.clone())
            .app_data(cookie_security.clone())
            .app_data(refresh_interval.clone())
            .route("/health", web::get().to(health_check))
            .route("/api/reservation", web::post().to(create_reservation))
            .route("/api/reservations", web::post().to(create_reservation))
            .route("/api/reservation/{id}", web::patch().to(update_reservation))
            .service(
                web::resource("/api/menu")
                    .route(web::get().to(list_menu))
                    .route(web::post().to(create_menu_item))
            )
            .route("/api/menu/sections", web::get().to(list_menu_sections))
            .route("/api/menu/{id}", web::delete().to(delete_menu_entry))
            .service(
                web::scope("/api/admin")
                    .wrap(AdminGate::rejecting().exempt(&["/api/admin/login", "/api/admin/logout"]))
                    .route("/login", web::post().to(login))
                    .route("/logout", web::post().to(logout))
                    .service(
                        web::resource("/reservations")
                            .route(web::get().to(list_reservations))
                            .route(web::patch().to(update_reservation_by_body))
                    )
                    .service(
                        web::resource("/reservations/{id}")
                            .route(web::patch().to(update_reservation))
                            .route(web::delete().to(remove_reservation))
                    )
                    .service(
                        web::resource("/menu")
                            .route(web::get().to(list_menu_admin))
                            .route(web::post().to(create_menu_item))
                    )
                    .service(
                        web::resource("/menu/items")
                            .route(web::post().to(create_menu_item))
                            .route(web::put().to(update_menu_entry_by_body))
                            .route(web::delete().to(delete_menu_entry_by_query))
                    )
                    .service(
                        web::resource("/menu/{id}")
                            .route(web::get().to(get_menu_entry))
                            .route(web::put().to(update_menu_entry))
                            .route(web::delete().to(delete_menu_entry))
                    )
            )
            .service(
                web::scope("/admin")
                    .wrap(AdminGate::redirecting().exempt(&["/admin", "/admin/login"]))
                    .route("", web::get().to(admin_root))
                    .route("/login", web::get().to(login_page))
                    .route("/dashboard", web::get().to(dashboard))
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
