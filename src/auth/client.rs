use base64::{
    alphabet,
    engine::{self, general_purpose},
    Engine as _,
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde_json::Value as JsonValue;

use super::model::{AuthUser, CredentialsReq, IdTokenClaims, JwksResp};
use crate::constants::*;
use crate::utils::AppError;

#[cfg(test)]
use mockall::automock;

/// REST client for the external identity provider. Accounts are email +
/// password; every response carries a signed id token.
pub struct AuthClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
    jwks_uri: String,
}

#[cfg_attr(test, automock)]
impl AuthClient {
    pub fn new() -> Self {
        let api_url = std::env::var("AUTH_API_URL").expect("AUTH_API_URL not found in .env file");
        let api_key = std::env::var("AUTH_API_KEY").expect("AUTH_API_KEY not found in .env file");
        let jwks_uri = std::env::var("AUTH_JWKS_URI").unwrap_or(SECURETOKEN_JWKS_URI.to_owned());
        Self {
            http: reqwest::Client::new(),
            api_url,
            api_key,
            jwks_uri,
        }
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        self.post_credentials("accounts:signUp", email, password)
            .await
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, AppError> {
        self.post_credentials("accounts:signInWithPassword", email, password)
            .await
    }

    /// Validate the id token against the provider's published JWKS and
    /// return its claims
    pub async fn verify_id_token(&self, id_token: &str) -> Result<IdTokenClaims, AppError> {
        let jwks_resp = reqwest::get(&self.jwks_uri)
            .await?
            .json::<JwksResp>()
            .await?;
        let parts = id_token.split('.').collect::<Vec<_>>();
        let Some(token_header) = parts.first() else {
            let err = AppError::Auth("Invalid token, could not split".into());
            return Err(err);
        };
        let bytes = engine::GeneralPurpose::new(&alphabet::STANDARD, general_purpose::NO_PAD)
            .decode(token_header)?;
        let token_header = serde_json::from_slice::<JsonValue>(&bytes)?;
        let kid = token_header["kid"]
            .as_str()
            .ok_or(AppError::Auth("Invalid token, could not get kid".into()))?;
        let idx = jwks_resp
            .keys
            .iter()
            .position(|k| k.kid.as_str() == kid)
            .ok_or(AppError::Auth("Invalid token, not valid kid".into()))?;
        let n = jwks_resp.keys[idx].n.as_str();
        let e = jwks_resp.keys[idx].e.as_str();
        let decoding_key =
            DecodingKey::from_rsa_components(n, e).map_err(|err| AppError::Auth(err.to_string()))?;
        let validation = Validation::new(Algorithm::RS256);
        let decoded_token = decode::<IdTokenClaims>(id_token, &decoding_key, &validation)
            .map_err(|err| AppError::Auth(err.to_string()))?;
        Ok(decoded_token.claims)
    }
}

impl AuthClient {
    async fn post_credentials(
        &self,
        endpoint: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthUser, AppError> {
        let url = format!("{}/{}?key={}", self.api_url, endpoint, self.api_key);
        let body = CredentialsReq {
            email,
            password,
            return_secure_token: true,
        };
        let res = self.http.post(&url).json(&body).send().await?;
        if res.status().is_success() {
            let user = res.json::<AuthUser>().await?;
            return Ok(user);
        }
        let body = res.json::<JsonValue>().await?;
        let code = body["error"]["message"].as_str().unwrap_or("UNKNOWN");
        Err(map_auth_error(code))
    }
}

/// Map provider error codes to the messages shown to the user
pub fn map_auth_error(code: &str) -> AppError {
    if code.starts_with("EMAIL_EXISTS") {
        return AppError::Auth("This email is already registered. Try logging in instead.".into());
    }
    if code.starts_with("INVALID_EMAIL") {
        return AppError::Auth("Invalid email format.".into());
    }
    if code.starts_with("WEAK_PASSWORD") {
        return AppError::Auth("Password should be at least 6 characters.".into());
    }
    if code.starts_with("INVALID_LOGIN_CREDENTIALS")
        || code.starts_with("INVALID_PASSWORD")
        || code.starts_with("EMAIL_NOT_FOUND")
    {
        return AppError::Auth("Incorrect Credentials. Please try again.".into());
    }
    AppError::Auth("Something went wrong. Please try again.".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth_message(code: &str) -> String {
        match map_auth_error(code) {
            AppError::Auth(msg) => msg,
            other => panic!("expected Auth error, got {other:?}"),
        }
    }

    #[test]
    fn test_map_auth_error_known_codes() {
        assert_eq!(
            auth_message("EMAIL_EXISTS"),
            "This email is already registered. Try logging in instead."
        );
        assert_eq!(auth_message("INVALID_EMAIL"), "Invalid email format.");
        assert_eq!(
            auth_message("WEAK_PASSWORD : Password should be at least 6 characters"),
            "Password should be at least 6 characters."
        );
        assert_eq!(
            auth_message("INVALID_LOGIN_CREDENTIALS"),
            "Incorrect Credentials. Please try again."
        );
    }

    #[test]
    fn test_map_auth_error_unknown_code() {
        assert_eq!(
            auth_message("TOO_MANY_ATTEMPTS_TRY_LATER"),
            "Something went wrong. Please try again."
        );
    }
}
