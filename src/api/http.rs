//! Browser `fetch` backend

use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{Backend, Endpoint, Method, Scope};
use crate::config::AppConfig;
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpBackend {
    freya_base: String,
    alice_base: String,
}

impl HttpBackend {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            freya_base: config.api_base.clone(),
            alice_base: config.alice_base.clone(),
        }
    }

    fn url(&self, endpoint: &Endpoint) -> String {
        let base = match endpoint.scope {
            Scope::Freya => &self.freya_base,
            Scope::Alice => &self.alice_base,
        };
        format!("{}{}", base, endpoint.path)
    }
}

/// Read JSON; a non-2xx answer still carries `{success, error}` on most routes
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let ok = response.ok();
    let text = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
    match serde_json::from_str::<T>(&text) {
        Ok(value) => Ok(value),
        Err(_) if !ok => Err(ApiError::Status(status)),
        Err(err) => Err(err.into()),
    }
}

impl Backend for HttpBackend {
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, "GET");
        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }

    async fn send<P: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        payload: &P,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint);
        tracing::debug!(%url, ?method, "sending");
        let builder = match method {
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
        };
        let request = builder.json(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        decode(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_use_configured_prefixes() {
        let config = AppConfig::from_json(r#"{"api_base": "http://host:5000", "alice_base": "http://host:5000/alice"}"#).unwrap();
        let backend = HttpBackend::new(&config);
        assert_eq!(backend.url(&Endpoint::freya("/api/ideas")), "http://host:5000/api/ideas");
        assert_eq!(
            backend.url(&Endpoint::alice("/api/quests")),
            "http://host:5000/alice/api/quests"
        );
    }

    #[test]
    fn default_prefixes_are_same_origin() {
        let backend = HttpBackend::new(&AppConfig::default());
        assert_eq!(backend.url(&Endpoint::freya("/api/tasks")), "/api/tasks");
        assert_eq!(backend.url(&Endpoint::alice("/api/story-arcs")), "/alice/api/story-arcs");
    }
}
