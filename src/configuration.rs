use config::{Config, ConfigError, Environment, File};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings{
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
    pub email: EmailSettings,
    pub admin: AdminSettings,
    pub jwt: JWTSettings,
    pub dashboard: DashboardSettings
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApplicationSettings{
    pub host: String,
    pub port: u16,
    // Public address of the site, used for links inside emails
    pub base_url: String,
    pub secure_cookies: bool,
    // Directory holding logo.png and payment-qr.png
    pub static_dir: String
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatabaseSettings{
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub name: String,
    pub max_connections: u32
}

impl DatabaseSettings {
    // Url to the postgres server, without selecting a database
    pub fn get_database_url(&self) -> String{
        format!(
            "postgres://{}:{}@{}:{}",
            self.username,
            self.password.expose_secret(),
            self.host,
            self.port
        )
    }

    pub fn get_database_table_url(&self) -> String{
        format!("{}/{}", self.get_database_url(), self.name)
    }
}

#[derive(Deserialize, Debug, Clone)]
pub struct EmailSettings{
    pub api_uri: String,
    pub sender: String,
    pub authorization_token: SecretString,
    pub timeout_secs: u64,
    // Where new-reservation alerts go; defaults to the sender when unset
    pub restaurant_recipient: Option<String>
}

#[derive(Deserialize, Debug, Clone)]
pub struct AdminSettings{
    pub username: String,
    pub password: SecretString
}

#[derive(Deserialize, Debug, Clone)]
pub struct JWTSettings{
    pub secret: String,
    pub expiry_hours: u64
}

#[derive(Deserialize, Debug, Clone)]
pub struct DashboardSettings{
    pub refresh_interval_secs: u64
}

impl Settings{
    /// Reads `configuration/base.yaml`, then applies `APP_*` environment
    /// overrides (`APP_ADMIN__PASSWORD=...`, `APP_EMAIL__AUTHORIZATION_TOKEN=...`).
    pub fn get() -> Result<Self, ConfigError>{
        Config::builder()
            .add_source(File::with_name("configuration/base.yaml"))
            .add_source(
                Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__")
            )
            .build()?
            .try_deserialize::<Settings>()
    }
}
