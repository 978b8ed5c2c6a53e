//! Google service-account authentication (OAuth 2.0 JWT bearer flow).
//!
//! A signed RS256 assertion is exchanged for an access token on every call. Tokens are not
//! cached: each request obtains its own, so no state is shared between requests.

use base64::{engine::general_purpose, Engine as _};
use heridas_core::config::ServiceAccount;
use heridas_core::{LogError, LogResult};
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs1v15::SigningKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer};
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

const ASSERTION_LIFETIME_SECS: i64 = 3600;
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub(crate) struct Claims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Obtains access tokens for one service account.
#[derive(Clone)]
pub struct ServiceAccountAuth {
    client: reqwest::Client,
    account: ServiceAccount,
    token_url: String,
    scopes: String,
}

impl ServiceAccountAuth {
    pub fn new(
        client: reqwest::Client,
        account: ServiceAccount,
        token_url: String,
        scopes: &[&str],
    ) -> Self {
        Self {
            client,
            account,
            token_url,
            scopes: scopes.join(" "),
        }
    }

    /// Builds the signed assertion for the given issue time (seconds since the epoch).
    pub(crate) fn assertion(&self, issued_at: i64) -> LogResult<String> {
        let key = load_private_key(self.account.private_key_pem())?;
        let claims = Claims {
            iss: self.account.client_email().to_string(),
            scope: self.scopes.clone(),
            aud: self.token_url.clone(),
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };
        sign_jwt(&key, &claims)
    }

    /// Exchanges a fresh assertion for an access token.
    pub async fn access_token(&self) -> LogResult<String> {
        let assertion = self.assertion(chrono::Utc::now().timestamp())?;

        let response = self
            .client
            .post(&self.token_url)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| LogError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = crate::error_excerpt(response).await;
            return Err(LogError::Auth(format!("token endpoint returned {status}: {body}")));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| LogError::Auth(format!("invalid token response: {e}")))?;
        Ok(token.access_token)
    }
}

/// Accepts PKCS#8 (`BEGIN PRIVATE KEY`, as issued by Google) and PKCS#1
/// (`BEGIN RSA PRIVATE KEY`) PEM.
fn load_private_key(pem: &str) -> LogResult<RsaPrivateKey> {
    if pem.contains("BEGIN RSA PRIVATE KEY") {
        RsaPrivateKey::from_pkcs1_pem(pem)
            .map_err(|e| LogError::Auth(format!("invalid PKCS#1 private key: {e}")))
    } else {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .map_err(|e| LogError::Auth(format!("invalid PKCS#8 private key: {e}")))
    }
}

fn sign_jwt(key: &RsaPrivateKey, claims: &Claims) -> LogResult<String> {
    let header = general_purpose::URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
    let payload = serde_json::to_vec(claims).map_err(|e| LogError::Auth(e.to_string()))?;
    let signing_input = format!(
        "{header}.{}",
        general_purpose::URL_SAFE_NO_PAD.encode(payload)
    );

    let signing_key = SigningKey::<Sha256>::new(key.clone());
    let signature = signing_key.sign(signing_input.as_bytes());

    Ok(format!(
        "{signing_input}.{}",
        general_purpose::URL_SAFE_NO_PAD.encode(signature.to_bytes())
    ))
}
