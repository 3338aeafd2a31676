//! HS256 bearer tokens bound to a per-login session epoch.
//!
//! Every call to [`JwtIdentityVerifier::issue`] draws a fresh epoch for the
//! user and embeds it in the token. Verification accepts a token only while
//! its epoch is still the user's current one, so logging in again revokes all
//! tokens issued before.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{AuthError, Identity, IdentityVerifier, SessionEpoch, SessionEpochFactory, UserId};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    epoch: String,
    exp: u64,
}

pub struct JwtIdentityVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
    /// Current epoch per user
    epochs: Mutex<HashMap<UserId, SessionEpoch>>,
}

impl JwtIdentityVerifier {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
            epochs: Mutex::new(HashMap::new()),
        }
    }

    /// Log `user_id` in: rotate its epoch and sign a token bound to it.
    pub async fn issue(&self, user_id: &UserId) -> Result<String, AuthError> {
        let epoch = SessionEpochFactory::generate();
        let exp = (Utc::now() + self.ttl).timestamp().max(0) as u64;
        let claims = Claims {
            sub: user_id.as_str().to_string(),
            epoch: epoch.as_str().to_string(),
            exp,
        };
        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))?;

        self.epochs.lock().await.insert(user_id.clone(), epoch);
        tracing::debug!("Issued token for '{}', previous sessions revoked", user_id);
        Ok(token)
    }

    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::Expired,
                _ => AuthError::InvalidToken,
            })
    }
}

#[async_trait]
impl IdentityVerifier for JwtIdentityVerifier {
    async fn verify_token(&self, token: &str) -> Result<Identity, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }
        let claims = self.decode(token)?;
        let user_id = UserId::new(claims.sub).map_err(|_| AuthError::InvalidToken)?;
        let epoch = SessionEpoch::new(claims.epoch);

        let epochs = self.epochs.lock().await;
        match epochs.get(&user_id) {
            Some(current) if current == &epoch => Ok(Identity { user_id, epoch }),
            _ => Err(AuthError::StaleEpoch),
        }
    }
}
