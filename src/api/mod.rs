//! REST client for the HAMS backend
//!
//! One `ApiClient` wraps a `reqwest::Client` configured with the global
//! timeout. Every request carries the stored bearer token; a 401 answer
//! clears the session before the error reaches the caller.

pub mod admin;
pub mod animals;
pub mod auth;
pub mod event_types;
pub mod events;
pub mod groups;
pub mod roles;
pub mod upload;
pub mod users;
pub mod zoos;

use std::time::Duration;

use reqwest::{header, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    config::ApiConfig,
    error::{AppError, AppResult, ErrorResponse},
    services::session::SessionStore,
};

/// `{"message": ...}` body returned by mutations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    pub message: String,
}

impl ApiMessage {
    fn from_body(body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or_else(|| fallback.to_string());
        Self { message }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(config: &ApiConfig, session: SessionStore) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("hams-dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request with the bearer token attached when a session exists
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!("{} {}", method, path);
        let builder = self.http.request(method, self.url(path));
        match self.session.token() {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        }
    }

    /// Send and map failures: 401 clears the session, other non-success
    /// statuses become `AppError::Api` carrying the server `detail`.
    async fn send(&self, builder: RequestBuilder) -> AppResult<Response> {
        self.dispatch(builder, true).await
    }

    /// Sign-in requests: a 401 is a rejected credential and leaves the
    /// stored session alone.
    async fn send_credentials(&self, builder: RequestBuilder) -> AppResult<Response> {
        self.dispatch(builder, false).await
    }

    async fn dispatch(&self, builder: RequestBuilder, session_bound: bool) -> AppResult<Response> {
        let response = builder.send().await.map_err(|e| {
            tracing::error!("Request failed: {}", e);
            AppError::Network(e)
        })?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = ErrorResponse::detail_from_body(&body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });

        if session_bound && status == StatusCode::UNAUTHORIZED {
            tracing::warn!("Server rejected the session, clearing stored token");
            self.session.clear()?;
            return Err(AppError::Unauthorized(detail));
        }

        tracing::warn!("Request rejected with {}: {}", status, detail);
        Err(AppError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn json<T: DeserializeOwned>(response: Response) -> AppResult<T> {
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn message(response: Response, fallback: &str) -> AppResult<ApiMessage> {
        let body = response.text().await?;
        Ok(ApiMessage::from_body(&body, fallback))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> AppResult<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Self::json(response).await
    }

    pub(crate) async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> AppResult<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Self::json(response).await
    }

    pub(crate) async fn get_bytes<Q>(&self, path: &str, query: &Q) -> AppResult<Vec<u8>>
    where
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::GET, path).query(query))
            .await?;
        Ok(response.bytes().await?.to_vec())
    }

    pub(crate) async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<ApiMessage> {
        let response = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::message(response, "Created").await
    }

    /// Form-urlencoded sign-in; see `send_credentials`
    pub(crate) async fn post_credentials<B, T>(&self, path: &str, form: &B) -> AppResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .send_credentials(self.request(Method::POST, path).form(form))
            .await?;
        Self::json(response).await
    }

    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> AppResult<T> {
        let response = self
            .send(self.request(Method::POST, path).multipart(form))
            .await?;
        Self::json(response).await
    }

    pub(crate) async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> AppResult<ApiMessage> {
        let response = self.send(self.request(Method::PUT, path).json(body)).await?;
        Self::message(response, "Updated").await
    }

    /// PUT without a body (state toggles, path-only reassignment)
    pub(crate) async fn put_empty(&self, path: &str) -> AppResult<ApiMessage> {
        let response = self.send(self.request(Method::PUT, path)).await?;
        Self::message(response, "Updated").await
    }

    pub(crate) async fn put_empty_with_query<Q>(&self, path: &str, query: &Q) -> AppResult<ApiMessage>
    where
        Q: Serialize + ?Sized,
    {
        let response = self
            .send(self.request(Method::PUT, path).query(query))
            .await?;
        Self::message(response, "Updated").await
    }

    pub(crate) async fn delete(&self, path: &str) -> AppResult<ApiMessage> {
        let response = self.send(self.request(Method::DELETE, path)).await?;
        Self::message(response, "Deleted").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation_trims_base_url() {
        let config = ApiConfig {
            url: "http://localhost:8000/".to_string(),
            timeout_secs: 40,
        };
        let client = ApiClient::new(&config, SessionStore::in_memory()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/animals/status"), "http://localhost:8000/animals/status");
    }

    #[test]
    fn test_message_fallback() {
        assert_eq!(
            ApiMessage::from_body(r#"{"message": "Animal marked available"}"#, "Updated").message,
            "Animal marked available"
        );
        assert_eq!(ApiMessage::from_body("null", "Deleted").message, "Deleted");
        assert_eq!(ApiMessage::from_body("", "Created").message, "Created");
    }
}
