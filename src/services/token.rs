//! Bearer tokens
//!
//! Compact HS256 JSON Web Tokens (`header.payload.signature`, base64url
//! without padding). The payload carries `{userId, iat, exp}` with times in
//! seconds since the Unix epoch.

use chrono::{Duration, Utc};
use data_encoding::BASE64URL_NOPAD;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use serde_json::json;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "HS256";

/// Claims carried by a token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("Malformed token")]
    Malformed,
    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),
    #[error("Token signature mismatch")]
    BadSignature,
    #[error("Token expired")]
    Expired,
}

#[derive(Deserialize)]
struct Header {
    alg: String,
}

/// Issues and verifies tokens with one shared secret
#[derive(Clone)]
pub struct TokenSigner {
    mac: HmacSha256,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Self {
        // HMAC takes keys of any length, so this cannot fail
        let mac = HmacSha256::new_from_slice(secret.as_ref())
            .expect("HMAC-SHA256 accepts keys of any length");
        Self { mac, ttl }
    }

    /// Signer with a secret that lives only as long as this process
    pub fn ephemeral(ttl: Duration) -> Self {
        let secret: String = (0..4).map(|_| uuid::Uuid::new_v4().simple().to_string()).collect();
        Self::new(secret, ttl)
    }

    pub fn issue(&self, user_id: &str) -> String {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    fn issue_at(&self, user_id: &str, now: i64) -> String {
        let header = json!({ "alg": ALGORITHM, "typ": "JWT" }).to_string();
        let claims = json!({
            "userId": user_id,
            "iat": now,
            "exp": now + self.ttl.num_seconds(),
        })
        .to_string();

        let signing_input = format!(
            "{}.{}",
            BASE64URL_NOPAD.encode(header.as_bytes()),
            BASE64URL_NOPAD.encode(claims.as_bytes())
        );
        let signature = self.sign(signing_input.as_bytes());
        format!("{}.{}", signing_input, BASE64URL_NOPAD.encode(&signature))
    }

    fn verify_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let mut parts = token.split('.');
        let (header, payload, signature) = match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(h), Some(p), Some(s), None) => (h, p, s),
            _ => return Err(TokenError::Malformed),
        };

        let header_len = header.len();
        let header: Header = decode_json(header)?;
        if header.alg != ALGORITHM {
            return Err(TokenError::UnsupportedAlgorithm(header.alg));
        }

        let signing_input = &token[..header_len + 1 + payload.len()];
        let signature = BASE64URL_NOPAD
            .decode(signature.as_bytes())
            .map_err(|_| TokenError::Malformed)?;
        let mut mac = self.mac.clone();
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| TokenError::BadSignature)?;

        let claims: Claims = decode_json(payload)?;
        if claims.exp <= now {
            return Err(TokenError::Expired);
        }
        Ok(claims)
    }

    fn sign(&self, input: &[u8]) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(input);
        mac.finalize().into_bytes().to_vec()
    }
}

fn decode_json<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, TokenError> {
    let bytes = BASE64URL_NOPAD
        .decode(segment.as_bytes())
        .map_err(|_| TokenError::Malformed)?;
    serde_json::from_slice(&bytes).map_err(|_| TokenError::Malformed)
}
