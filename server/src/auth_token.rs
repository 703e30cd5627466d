use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub const MIN_SECRET_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthTokenError {
    #[error("admin secret is too short (min {MIN_SECRET_LEN} bytes)")]
    SecretTooShort,

    #[error("invalid admin token format")]
    InvalidFormat,

    #[error("admin token signature is invalid")]
    InvalidSignature,

    #[error("admin token is expired")]
    Expired,

    #[error("failed to decode admin token payload")]
    PayloadDecode,

    #[error("failed to parse admin token payload")]
    PayloadParse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AdminClaims {
    pub admin_ok: bool,
    pub issued_at_ms: u64,
    pub expires_at_ms: u64,
}

impl AdminClaims {
    pub fn is_expired(&self, reference_ms: u64) -> bool {
        reference_ms >= self.expires_at_ms
    }
}

/// Signs and verifies the admin credential carried in the `admin_ok` cookie.
///
/// Tokens are `base64url(payload).base64url(hmac)`; the MAC covers the encoded
/// payload so any edit to either half fails verification.
#[derive(Clone)]
pub struct AdminTokenService {
    secret: Arc<[u8]>,
    ttl: Duration,
}

impl AdminTokenService {
    pub fn new(secret: Vec<u8>, ttl: Duration) -> Result<Self, AuthTokenError> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AuthTokenError::SecretTooShort);
        }

        Ok(Self {
            secret: Arc::<[u8]>::from(secret),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue_admin_token(&self, issued_at_ms: u64) -> Result<String, AuthTokenError> {
        let expires_at_ms = issued_at_ms.saturating_add(self.ttl.as_millis() as u64);
        self.issue(&AdminClaims {
            admin_ok: true,
            issued_at_ms,
            expires_at_ms,
        })
    }

    pub fn issue(&self, claims: &AdminClaims) -> Result<String, AuthTokenError> {
        let payload = serde_json::to_vec(claims).map_err(|_| AuthTokenError::PayloadParse)?;
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
        let signature = self.sign(payload_b64.as_bytes())?;
        let signature_b64 = URL_SAFE_NO_PAD.encode(signature);
        Ok(format!("{payload_b64}.{signature_b64}"))
    }

    pub fn verify(&self, token: &str, reference_ms: u64) -> Result<AdminClaims, AuthTokenError> {
        let (payload_b64, signature_b64) = token
            .split_once('.')
            .ok_or(AuthTokenError::InvalidFormat)?;

        let signature = URL_SAFE_NO_PAD
            .decode(signature_b64)
            .map_err(|_| AuthTokenError::InvalidFormat)?;

        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| AuthTokenError::InvalidSignature)?;
        mac.update(payload_b64.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| AuthTokenError::InvalidSignature)?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthTokenError::PayloadDecode)?;

        let claims: AdminClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthTokenError::PayloadParse)?;

        if !claims.admin_ok || claims.is_expired(reference_ms) {
            return Err(AuthTokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, bytes: &[u8]) -> Result<Vec<u8>, AuthTokenError> {
        let mut mac = HmacSha256::new_from_slice(&self.secret)
            .map_err(|_| AuthTokenError::InvalidSignature)?;
        mac.update(bytes);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Signing secret used when no `ADMIN_SECRET` is configured.
///
/// Anyone who knows the PIN can forge cookies with this value. Startup logs a
/// warning whenever it is in effect.
pub fn secret_from_pin(pin: &str) -> String {
    let digest = Sha256::digest(format!("admin-secret:{pin}").as_bytes());
    hex::encode(digest)
}

pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
