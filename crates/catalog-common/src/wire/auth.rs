use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::AuthError;
use crate::types::Identity;

const SIGN_IN_URL: &str = "https://identitytoolkit.googleapis.com/v1/accounts:signInWithPassword";

/// Messages the identity service returns for wrong email or password.
const CREDENTIAL_ERRORS: [&str; 4] = [
    "INVALID_LOGIN_CREDENTIALS",
    "INVALID_PASSWORD",
    "EMAIL_NOT_FOUND",
    "INVALID_EMAIL",
];

pub fn sign_in_url(api_key: &str) -> String {
    format!("{}?key={}", SIGN_IN_URL, urlencoding::encode(api_key))
}

pub fn sign_in_body(email: &str, password: &str) -> Value {
    json!({
        "email": email,
        "password": password,
        "returnSecureToken": true,
    })
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    email: String,
    /// Seconds, as a decimal string.
    expires_in: String,
}

/// Signed-in session as kept in browser storage.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredSession {
    pub email: String,
    pub id_token: String,
    /// Milliseconds since the Unix epoch.
    pub expires_at_ms: u64,
}

impl StoredSession {
    pub fn identity(&self) -> Identity {
        Identity::new(self.email.clone())
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// Decode a successful sign-in response received at `now_ms`.
pub fn decode_sign_in(body: &str, now_ms: u64) -> Result<StoredSession, AuthError> {
    let resp: SignInResponse = serde_json::from_str(body)
        .map_err(|e| AuthError::Transport(format!("malformed sign-in response: {e}")))?;
    let expires_in_s: u64 = resp.expires_in.parse().unwrap_or(0);
    Ok(StoredSession {
        email: resp.email,
        id_token: resp.id_token,
        expires_at_ms: now_ms.saturating_add(expires_in_s.saturating_mul(1000)),
    })
}

/// Classify a sign-in error response.
pub fn decode_sign_in_error(body: &str) -> AuthError {
    let message = super::error_message(body);
    // Messages may carry a suffix such as "INVALID_PASSWORD : details".
    let code = message.split([' ', ':']).next().unwrap_or_default();
    if CREDENTIAL_ERRORS.contains(&code) {
        AuthError::InvalidCredentials
    } else {
        AuthError::Transport(message)
    }
}
