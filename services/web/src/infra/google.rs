use serde::Deserialize;
use url::Url;

use crate::config::GoogleConfig;
use crate::domain::repository::GoogleIdentityPort;
use crate::domain::types::GoogleProfile;
use crate::error::WebServiceError;

const AUTHORIZE_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

#[derive(Clone)]
pub struct GoogleOauthClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    redirect_url: String,
}

impl GoogleOauthClient {
    pub fn new(config: &GoogleConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            redirect_url: config.redirect_url.clone(),
        }
    }

    /// Build the authorize URL the user is redirected to, with the session's
    /// CSRF state token.
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = Url::parse(AUTHORIZE_ENDPOINT).expect("static authorize endpoint");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_url)
            .append_pair("response_type", "code")
            .append_pair("scope", "openid email profile")
            .append_pair("state", state);
        url.into()
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct UserinfoResponse {
    id: String,
    email: String,
    #[serde(default)]
    name: Option<String>,
}

impl GoogleIdentityPort for GoogleOauthClient {
    /// Callback failures are a flow outcome (the handler redirects with an
    /// error code), so anything the provider refuses resolves to `None`
    /// rather than a 5xx.
    async fn exchange_code(&self, code: &str) -> Result<Option<GoogleProfile>, WebServiceError> {
        let token_resp = self
            .http
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("code", code),
                ("client_id", &self.client_id),
                ("client_secret", &self.client_secret),
                ("redirect_uri", &self.redirect_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await;

        let token_resp = match token_resp {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "google token exchange rejected");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "google token exchange failed");
                return Ok(None);
            }
        };

        let token: TokenResponse = match token_resp.json().await {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "google token response unreadable");
                return Ok(None);
            }
        };

        let userinfo_resp = self
            .http
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token.access_token)
            .send()
            .await;

        let userinfo: UserinfoResponse = match userinfo_resp {
            Ok(resp) if resp.status().is_success() => match resp.json().await {
                Ok(info) => info,
                Err(e) => {
                    tracing::warn!(error = %e, "google userinfo response unreadable");
                    return Ok(None);
                }
            },
            Ok(resp) => {
                tracing::warn!(status = %resp.status(), "google userinfo rejected");
                return Ok(None);
            }
            Err(e) => {
                tracing::warn!(error = %e, "google userinfo request failed");
                return Ok(None);
            }
        };

        let name = userinfo
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| userinfo.email.clone());

        Ok(Some(GoogleProfile {
            id: userinfo.id,
            email: userinfo.email,
            name,
        }))
    }
}
