//! HTTP adapter for the screening backend

use super::protocol::{
    ChatRequest, ChatResponse, CreateSessionRequest, CreateSessionResponse, ErrorBody,
    FinalizeRequest, FinalizeResponse,
};
use async_trait::async_trait;
use rapport_application::{GatewayError, ScreeningGateway};
use rapport_domain::{ConsentInput, Report, SessionId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// [`ScreeningGateway`] over JSON-over-HTTP
///
/// One POST per operation, no retries and no timeout beyond the client's.
pub struct HttpScreeningGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpScreeningGateway {
    pub fn new(base_url: &str) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, GatewayError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(path);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match ErrorBody::message_from(&body) {
                m if m.is_empty() => status.canonical_reason().unwrap_or("Unknown").to_string(),
                m => m,
            };
            warn!("POST {} returned {}: {}", url, status.as_u16(), message);
            return Err(GatewayError::server(status.as_u16(), message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;
        serde_json::from_slice(&bytes).map_err(|e| {
            warn!("POST {} returned an unexpected body: {}", url, e);
            GatewayError::Decode(e.to_string())
        })
    }
}

#[async_trait]
impl ScreeningGateway for HttpScreeningGateway {
    async fn create_session(&self, consent: &ConsentInput) -> Result<SessionId, GatewayError> {
        let response: CreateSessionResponse = self
            .post("session", &CreateSessionRequest::from(consent))
            .await?;
        Ok(response.session_id)
    }

    async fn send_turn(&self, session_id: &SessionId, text: &str) -> Result<String, GatewayError> {
        let response: ChatResponse = self.post("chat", &ChatRequest { session_id, text }).await?;
        Ok(response.assistant)
    }

    async fn finalize(&self, session_id: &SessionId) -> Result<Report, GatewayError> {
        let response: FinalizeResponse = self
            .post("finalize", &FinalizeRequest { session_id })
            .await?;
        Ok(response.report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let gateway = HttpScreeningGateway::new("http://localhost:8000/");
        assert_eq!(gateway.base_url(), "http://localhost:8000");
        assert_eq!(gateway.endpoint("chat"), "http://localhost:8000/chat");
    }
}
