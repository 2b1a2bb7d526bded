use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::configuration::JWTSettings;

// Issues and checks the opaque value stored in the admin_token cookie
#[derive(Clone)]
pub struct Tokenizer{
    pub secret: SecretString,
    pub expiry_hours: u64 
}

impl Tokenizer {
    pub fn new(settings: &JWTSettings) -> Self {
        Self{
            secret: SecretString::new(settings.secret.clone().into()),
            expiry_hours: settings.expiry_hours
        }
    }

    pub fn lifetime(&self) -> Duration {
        Duration::hours(self.expiry_hours as i64)
    }

    pub fn generate_key(&self, username: &str) -> Result<String, jsonwebtoken::errors::Error>{
        let issued_at = Utc::now();
        let expiry = issued_at + self.lifetime();

        let claims = Claims{
            sub: username.to_string(),
            jti: Uuid::new_v4(),
            iat: issued_at.timestamp() as usize,
            exp: expiry.timestamp() as usize
        };

        jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.expose_secret().as_bytes())
        )
    }

    pub fn decode_key(&self, token: &str) -> Option<Claims>{
        match jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.expose_secret().as_bytes()),
            &Validation::new(Algorithm::HS256)
        ) {
            Ok(decoded_data) => Some(decoded_data.claims),
            Err(e) => {
                tracing::debug!("Rejected admin token: {}", e);
                None
            }
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims{
    pub sub: String,
    pub jti: Uuid,
    pub iat: usize,
    pub exp: usize
}
