use anyhow::Context;
use argon2::{password_hash::{rand_core::OsRng, SaltString}, Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use secrecy::{ExposeSecret, SecretString};

use crate::{configuration::AdminSettings, telemetry::spawn_blocking_with_tracing};

// Function to compute password hash
pub fn compute_password_hash(password: &SecretString) -> Result<SecretString, anyhow::Error>{
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
                            .hash_password(password.expose_secret().as_bytes(), &salt)
                            .map_err(|_| anyhow::anyhow!("Failed to compute password hash"))?
                            .to_string();

    Ok(SecretString::from(password_hash))
}

/// The single shared admin login. Only the argon2 hash of the configured
/// password is kept once the application has started.
#[derive(Clone)]
pub struct AdminCredentials{
    username: String,
    password_hash: SecretString
}

impl AdminCredentials {
    pub fn from_settings(settings: &AdminSettings) -> Result<Self, anyhow::Error>{
        Ok(Self{
            username: settings.username.clone(),
            password_hash: compute_password_hash(&settings.password)?
        })
    }

    #[tracing::instrument(
        "Verifying admin credentials",
        skip(self, password)
    )]
    pub async fn verify(&self, username: &str, password: SecretString) -> Result<bool, anyhow::Error>{
        let username_matches = username == self.username;
        let hashed_password = self.password_hash.clone();

        // Verified regardless of the username match
        let password_matches = spawn_blocking_with_tracing(move || {
            let parsed = PasswordHash::new(hashed_password.expose_secret())
                .map_err(|_| anyhow::anyhow!("Failed to parse stored admin password hash"))?;

            Ok::<bool, anyhow::Error>(Argon2::default()
                .verify_password(password.expose_secret().as_bytes(), &parsed)
                .is_ok())
        })
        .await
        .context("Failed due to threadpool error")??;

        Ok(username_matches && password_matches)
    }
}
