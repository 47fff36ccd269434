//! The REST API client.
//!
//! [`ApiClient`] speaks the backend's conventions: list via POST on the
//! collection, detail via GET, create via POST on `create/`, update and
//! status toggle via PATCH on the detail URL. Every request carries the
//! stored bearer token; a 401 on a non-auth endpoint triggers one
//! single-flight token refresh and one retry of the original request.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn, Instrument};
use url::Url;

use campus_erp_core::logging::api_span;
use campus_erp_core::settings::Settings;
use campus_erp_core::value::Value;
use campus_erp_forms::{PartBody, Payload, SubmitMode, Submission};

use crate::envelope::{self, DetailEnvelope, ListEnvelope};
use crate::error::{ClientError, ClientResult};
use crate::refresh::{RefreshCoordinator, RefreshOutcome};
use crate::tokens::{SessionState, TokenPair, TokenStore};

/// The authenticated REST client.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token_url: String,
    refresh_url: String,
    upload_timeout: Duration,
    tokens: Arc<dyn TokenStore>,
    refresh: RefreshCoordinator,
}

impl ApiClient {
    /// Builds a client from settings and a token store.
    pub fn new(settings: &Settings, tokens: Arc<dyn TokenStore>) -> ClientResult<Self> {
        // Catch a broken base URL at construction, not on first request.
        Url::parse(&settings.api_base_url)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            token_url: settings.api_url(&settings.token_path),
            refresh_url: settings.token_refresh_url.clone(),
            upload_timeout: Duration::from_secs(settings.upload_timeout_secs),
            tokens,
            refresh: RefreshCoordinator::new(),
        })
    }

    // ── URLs ───────────────────────────────────────────────────────────

    fn collection_url(&self, base_path: &str) -> String {
        format!("{}/{}/", self.base_url, base_path.trim_matches('/'))
    }

    fn create_url(&self, base_path: &str) -> String {
        format!("{}create/", self.collection_url(base_path))
    }

    fn detail_url(&self, base_path: &str, id: &str) -> String {
        format!("{}{id}/", self.collection_url(base_path))
    }

    // ── Session ────────────────────────────────────────────────────────

    /// Exchanges credentials for a token pair and stores it.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<()> {
        let url = self.token_url.clone();
        let credentials = json!({"username": username, "password": password});
        let body = self
            .request("login", true, move |http| {
                Ok(http.post(&url).json(&credentials))
            })
            .await?;

        let tokens: TokenPair = serde_json::from_value(body).map_err(|err| {
            ClientError::Unexpected {
                status: 200,
                message: format!("malformed token response: {err}"),
            }
        })?;
        self.tokens.save(tokens).await;
        Ok(())
    }

    /// Drops the stored tokens.
    pub async fn logout(&self) {
        self.tokens.clear().await;
    }

    /// Reports whether a token pair is available.
    pub async fn session_state(&self) -> SessionState {
        if self.tokens.load().await.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    // ── Entity operations ──────────────────────────────────────────────

    /// Fetches one page of records.
    ///
    /// The query object carries `page`, `pageSize`, `search_text`, and any
    /// entity filters; the backend lists via POST on the collection URL.
    pub async fn list(
        &self,
        base_path: &str,
        query: &serde_json::Value,
    ) -> ClientResult<ListEnvelope> {
        let url = self.collection_url(base_path);
        let query = query.clone();
        let body = self
            .request(base_path, false, move |http| {
                Ok(http.post(&url).json(&query))
            })
            .await?;

        serde_json::from_value(body).map_err(|err| ClientError::Unexpected {
            status: 200,
            message: format!("malformed list response: {err}"),
        })
    }

    /// Fetches one record by id, as the map form the form layer edits.
    pub async fn detail(
        &self,
        base_path: &str,
        id: &str,
    ) -> ClientResult<std::collections::HashMap<String, Value>> {
        let url = self.detail_url(base_path, id);
        let body = self
            .request(base_path, false, move |http| Ok(http.get(&url)))
            .await?;

        let envelope: DetailEnvelope =
            serde_json::from_value(body).map_err(|err| ClientError::Unexpected {
                status: 200,
                message: format!("malformed detail response: {err}"),
            })?;
        Ok(envelope::record_from_json(&envelope.data))
    }

    /// Sends a built form submission.
    ///
    /// Create posts to the collection's `create/` URL; edit patches the
    /// detail URL. A multipart payload gets the upload timeout and is
    /// rebuilt from the submission on the refresh retry.
    pub async fn submit(
        &self,
        base_path: &str,
        submission: &Submission,
    ) -> ClientResult<serde_json::Value> {
        let url = match submission.mode {
            SubmitMode::Create => self.create_url(base_path),
            SubmitMode::Edit => {
                let id = submission.id.as_deref().ok_or_else(|| {
                    ClientError::InvalidSubmission("edit submission without a record id".into())
                })?;
                self.detail_url(base_path, id)
            }
        };

        self.request(base_path, false, move |http| {
            let builder = match submission.mode {
                SubmitMode::Create => http.post(&url),
                SubmitMode::Edit => http.patch(&url),
            };
            match &submission.payload {
                Payload::Json(map) => Ok(builder.json(map)),
                Payload::Multipart(parts) => {
                    let mut form = reqwest::multipart::Form::new();
                    for part in parts {
                        form = match &part.body {
                            PartBody::Text(text) => form.text(part.name.clone(), text.clone()),
                            PartBody::File(file) => {
                                let file_part = reqwest::multipart::Part::bytes(file.bytes.clone())
                                    .file_name(file.file_name.clone())
                                    .mime_str(&file.content_type)?;
                                form.part(part.name.clone(), file_part)
                            }
                        };
                    }
                    Ok(builder.multipart(form).timeout(self.upload_timeout))
                }
            }
        })
        .await
    }

    /// Flips a record's active flag.
    pub async fn toggle_active(
        &self,
        base_path: &str,
        id: &str,
        is_active: bool,
    ) -> ClientResult<serde_json::Value> {
        let url = self.detail_url(base_path, id);
        let body = json!({"is_active": is_active});
        self.request(base_path, false, move |http| {
            Ok(http.patch(&url).json(&body))
        })
        .await
    }

    // ── Request pipeline ───────────────────────────────────────────────

    /// Sends a request with bearer auth and the refresh-then-retry rule.
    ///
    /// `make` builds the request fresh each attempt so multipart bodies can
    /// be re-encoded on retry. Auth endpoints never trigger a refresh.
    async fn request<F>(
        &self,
        path_label: &str,
        auth_endpoint: bool,
        make: F,
    ) -> ClientResult<serde_json::Value>
    where
        F: Fn(&reqwest::Client) -> ClientResult<reqwest::RequestBuilder>,
    {
        let span = api_span(path_label);
        async move {
            let mut builder = make(&self.http)?;
            if let Some(tokens) = self.tokens.load().await {
                builder = builder.bearer_auth(&tokens.access);
            }
            let response = builder.send().await?;

            if response.status() == reqwest::StatusCode::UNAUTHORIZED && !auth_endpoint {
                debug!("access token rejected, refreshing");
                match self.refresh.refresh(|| self.perform_refresh()).await {
                    RefreshOutcome::Refreshed(access) => {
                        let retry = make(&self.http)?.bearer_auth(access);
                        let response = retry.send().await?;
                        // A second 401 surfaces as Unauthorized; one retry only.
                        return Self::classify(response).await;
                    }
                    RefreshOutcome::Failed => return Err(ClientError::Unauthorized),
                }
            }

            Self::classify(response).await
        }
        .instrument(span)
        .await
    }

    /// Exchanges the refresh token for a new access token.
    ///
    /// Any failure clears the stored tokens; the session is over and the
    /// shell routes to login.
    async fn perform_refresh(&self) -> Option<String> {
        let Some(tokens) = self.tokens.load().await else {
            debug!("no refresh token available");
            return None;
        };

        let result = self
            .http
            .post(&self.refresh_url)
            .json(&json!({"refresh": tokens.refresh}))
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status().is_success() => response,
            Ok(response) => {
                warn!(status = %response.status(), "token refresh rejected");
                self.tokens.clear().await;
                return None;
            }
            Err(err) => {
                warn!(%err, "token refresh request failed");
                self.tokens.clear().await;
                return None;
            }
        };

        match response.json::<RefreshResponse>().await {
            Ok(body) => {
                let refresh = body.refresh.unwrap_or(tokens.refresh);
                self.tokens
                    .save(TokenPair {
                        access: body.access.clone(),
                        refresh,
                    })
                    .await;
                Some(body.access)
            }
            Err(err) => {
                warn!(%err, "malformed token refresh response");
                self.tokens.clear().await;
                None
            }
        }
    }

    /// Maps a raw response into the client error taxonomy.
    async fn classify(response: reqwest::Response) -> ClientResult<serde_json::Value> {
        let status = response.status().as_u16();
        let body = response
            .json::<serde_json::Value>()
            .await
            .unwrap_or(serde_json::Value::Null);

        let payload_status = envelope::payload_status(&body);
        if envelope::is_success(status, payload_status) {
            return Ok(body);
        }
        if status == 401 {
            return Err(ClientError::Unauthorized);
        }

        let validation_status =
            matches!(status, 400 | 422) || matches!(payload_status, Some(400 | 422));
        if validation_status {
            if let Some(field_errors) = envelope::extract_field_errors(&body) {
                return Err(ClientError::Validation { field_errors });
            }
        }

        let message = envelope::extract_message(&body)
            .unwrap_or_else(|| "request failed".to_string());
        Err(ClientError::Unexpected { status, message })
    }
}

#[derive(serde::Deserialize)]
struct RefreshResponse {
    access: String,
    refresh: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::MemoryTokenStore;

    fn client() -> ApiClient {
        let settings = Settings {
            api_base_url: "https://erp.school.test/api".into(),
            ..Settings::default()
        };
        ApiClient::new(&settings, Arc::new(MemoryTokenStore::new())).unwrap()
    }

    #[test]
    fn test_url_building() {
        let client = client();
        assert_eq!(
            client.collection_url("master/classes/"),
            "https://erp.school.test/api/master/classes/"
        );
        assert_eq!(
            client.create_url("master/classes"),
            "https://erp.school.test/api/master/classes/create/"
        );
        assert_eq!(
            client.detail_url("master/classes", "7"),
            "https://erp.school.test/api/master/classes/7/"
        );
    }

    #[test]
    fn test_new_rejects_bad_base_url() {
        let settings = Settings {
            api_base_url: "not a url".into(),
            ..Settings::default()
        };
        let result = ApiClient::new(&settings, Arc::new(MemoryTokenStore::new()));
        assert!(matches!(result, Err(ClientError::Url(_))));
    }

    #[tokio::test]
    async fn test_session_state_tracks_store() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let settings = Settings::default();
        let client = ApiClient::new(&settings, Arc::clone(&store)).unwrap();

        assert_eq!(client.session_state().await, SessionState::LoggedOut);
        store
            .save(TokenPair {
                access: "a".into(),
                refresh: "r".into(),
            })
            .await;
        assert_eq!(client.session_state().await, SessionState::LoggedIn);
        client.logout().await;
        assert_eq!(client.session_state().await, SessionState::LoggedOut);
    }
}
