use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;

use crate::api::envelope::Envelope;
use crate::api::models::{LoginRequest, LoginResponse, RegisterRequest};
use crate::config::settings::ClientSettings;
use crate::database::{Player, User};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("No hay sesión iniciada, inicie sesión primero")]
    NotAuthenticated,

    #[error("{message} (HTTP {status})")]
    Api { status: StatusCode, message: String },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Thin JSON client for the REST API. Every call yields the response
/// envelope, whatever the HTTP status.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let client = Self::build_client(settings.user_agent, settings.timeout_secs)?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Envelope<T>, ClientError> {
        let (_, envelope) = self.send(self.client.get(self.url(path))).await?;
        Ok(envelope)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.fetch_data(self.client.post(self.url("/api/login")).json(&request))
            .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<User, ClientError> {
        self.fetch_data(self.client.post(self.url("/api/register")).json(request))
            .await
    }

    pub async fn verify_token(&self) -> Result<User, ClientError> {
        self.fetch_data(self.client.get(self.url("/api/verify-token")))
            .await
    }

    pub async fn search_players(&self, name: &str) -> Result<Vec<Player>, ClientError> {
        let path = format!("/api/jugadores/buscar/{}", urlencoding::encode(name));
        self.fetch_data(self.client.get(self.url(&path))).await
    }

    fn build_client(user_agent: &str, timeout_secs: u64) -> Result<Client, ClientError> {
        Ok(Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<(StatusCode, Envelope<T>), ClientError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        let mut envelope: Envelope<T> = response.json().await?;

        // A non-2xx answer is a failure even if the body claims otherwise.
        if !status.is_success() && envelope.success {
            envelope.success = false;
            envelope.message.get_or_insert_with(|| status.to_string());
        }
        if !envelope.success {
            log::debug!("{} answered {}: {:?}", self.base_url, status, envelope.message);
        }

        Ok((status, envelope))
    }

    async fn fetch_data<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let (status, envelope) = self.send(request).await?;

        match envelope {
            Envelope { success: true, data: Some(data), .. } => Ok(data),
            Envelope { message, .. } => Err(ClientError::Api {
                status,
                message: message.unwrap_or_else(|| "Respuesta sin datos".to_string()),
            }),
        }
    }
}
