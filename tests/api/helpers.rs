use std::path::PathBuf;

use diesel::{Connection, PgConnection, RunQueryDsl};
use once_cell::sync::Lazy;
use reqwest::redirect::Policy;
use salud::{configuration::{DatabaseSettings, Settings}, startup::{get_connection_pool, Application}, telemetry::{get_subscriber, init_subscriber}, utils::DbPool};
use serde_json::Value;
use uuid::Uuid;
use wiremock::{matchers::{method, path}, Mock, MockServer, ResponseTemplate};

static LOGGER_INSTANCE: Lazy<()> = Lazy::new(|| {
    let log_level = "info".to_string();
    let name = "salud-test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(name, log_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(name, log_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const RESTAURANT_INBOX: &str = "owner@salud.example";

pub struct TestApp{
    pub host: String,
    pub port: u16,
    pub pool: DbPool,
    pub email_api: MockServer,
    pub api_client: reqwest::Client
}

impl TestApp {
    fn create_db(settings: &DatabaseSettings) {
        let mut connection = PgConnection::establish(&settings.get_database_url())
                                .expect("Failed to connect to postgres database");

        let query = format!(r#"CREATE DATABASE "{}";"#, settings.name);
        diesel::sql_query(query)
            .execute(&mut connection)
            .expect("Failed to create test database");
    }

    // logo.png and payment-qr.png stand-ins for the inline email images
    fn create_static_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("salud-static-{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("Failed to create static dir");
        std::fs::write(dir.join("logo.png"), b"logo").expect("Failed to write logo");
        std::fs::write(dir.join("payment-qr.png"), b"qr").expect("Failed to write qr code");
        dir
    }

    pub fn get_app_url(&self) -> String{
        format!("http://{}:{}", self.host, self.port)
    }

    pub async fn spawn_app() -> TestApp{
        Lazy::force(&LOGGER_INSTANCE);

        let email_api = MockServer::start().await;

        let mut settings = Settings::get().expect("Failed to read configuration");
        settings.application.port = 0;
        settings.application.static_dir = TestApp::create_static_dir().to_string_lossy().to_string();
        settings.database.name = Uuid::new_v4().to_string();
        settings.email.api_uri = email_api.uri();
        settings.email.restaurant_recipient = Some(RESTAURANT_INBOX.to_string());

        TestApp::create_db(&settings.database);
        let pool = get_connection_pool(&settings.database)
                    .expect("Failed to build connection pool to test database");

        let application = Application::build(settings)
                            .await
                            .expect("Failed to build application");

        tokio::task::spawn(application.server);

        let api_client = reqwest::Client::builder()
                            .redirect(Policy::none())
                            .cookie_store(true)
                            .build()
                            .unwrap();

        TestApp{
            host: application.host,
            port: application.port,
            pool,
            email_api,
            api_client
        }
    }

    pub async fn mock_email_relay(&self, status: u16) {
        Mock::given(path("/email"))
            .and(method("POST"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.email_api)
            .await;
    }

    pub async fn sent_emails(&self) -> Vec<Value> {
        self.email_api
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .map(|r| r.body_json::<Value>().unwrap())
            .collect()
    }

    pub async fn login_admin(&self) {
        let response = self.post_login(&serde_json::json!({
            "username": "admin",
            "password": "admin123"
        }))
        .await;

        assert_eq!(response.status().as_u16(), 200);
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.api_client.post(format!("{}/api/admin/login", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to login endpoint")
    }

    pub async fn post_reservation(&self, body: &Value) -> reqwest::Response {
        self.api_client.post(format!("{}/api/reservation", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to reservation endpoint")
    }

    pub async fn patch_reservation(&self, id: &str, body: &Value) -> reqwest::Response {
        self.api_client.patch(format!("{}/api/admin/reservations/{}", self.get_app_url(), id))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to reservation update endpoint")
    }

    pub async fn patch_reservations(&self, body: &Value) -> reqwest::Response {
        self.api_client.patch(format!("{}/api/admin/reservations", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to reservation collection endpoint")
    }

    pub async fn delete_reservation(&self, id: &str) -> reqwest::Response {
        self.api_client.delete(format!("{}/api/admin/reservations/{}", self.get_app_url(), id))
            .send()
            .await
            .expect("Failed to send request to reservation delete endpoint")
    }

    pub async fn get_admin_reservations(&self) -> reqwest::Response {
        self.api_client.get(format!("{}/api/admin/reservations", self.get_app_url()))
            .send()
            .await
            .expect("Failed to send request to reservation listing endpoint")
    }

    pub async fn post_menu_item(&self, body: &Value) -> reqwest::Response {
        self.api_client.post(format!("{}/api/admin/menu", self.get_app_url()))
            .json(body)
            .send()
            .await
            .expect("Failed to send request to menu endpoint")
    }

    pub async fn get_json(&self, route: &str) -> Value {
        self.api_client.get(format!("{}{}", self.get_app_url(), route))
            .send()
            .await
            .expect("Failed to send request")
            .json()
            .await
            .expect("Response was not json")
    }
}

pub fn asha_reservation() -> Value {
    serde_json::json!({
        "name": "Asha",
        "email": "a@x.com",
        "phone": "555",
        "date": "2025-01-10",
        "time": "19:00",
        "guests": 4
    })
}
