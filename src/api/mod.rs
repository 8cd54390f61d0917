//! REST API Bindings
//!
//! Typed wrappers over the Freya and Alice endpoints, organized by tool.
//! Every call goes through a [`Backend`], so controllers run against the
//! browser `fetch` in the app and an in-memory backend in tests.

// Futures here are driven by spawn_local on one thread; Send is never needed.
#![allow(async_fn_in_trait)]

mod alice;
mod freya;
mod http;
#[cfg(test)]
pub(crate) mod mock;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::ApiResponse;

pub use alice::*;
pub use freya::*;
pub use http::HttpBackend;

/// Which tool's API prefix a path lives under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Freya,
    Alice,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub scope: Scope,
    pub path: String,
}

impl Endpoint {
    pub fn freya(path: impl Into<String>) -> Self {
        Self { scope: Scope::Freya, path: path.into() }
    }

    pub fn alice(path: impl Into<String>) -> Self {
        Self { scope: Scope::Alice, path: path.into() }
    }
}

/// Canonical form with the default prefixes, used in logs
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scope {
            Scope::Freya => write!(f, "{}", self.path),
            Scope::Alice => write!(f, "/alice{}", self.path),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Post,
    Put,
}

pub trait Backend {
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError>;

    async fn send<P: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        payload: &P,
    ) -> Result<T, ApiError>;
}

/// Turn `{success: false}` into an error
pub(crate) fn accepted(response: ApiResponse) -> Result<ApiResponse, ApiError> {
    if response.success {
        Ok(response)
    } else {
        Err(ApiError::Rejected(response.error.unwrap_or_default()))
    }
}

/// POST a payload and require `{success: true}`
pub(crate) async fn post<B: Backend, P: Serialize>(
    api: &B,
    endpoint: Endpoint,
    payload: &P,
) -> Result<ApiResponse, ApiError> {
    let response: ApiResponse = api.send(Method::Post, &endpoint, payload).await?;
    accepted(response)
}
