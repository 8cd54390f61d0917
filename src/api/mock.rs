//! In-memory backend for controller tests

use std::cell::RefCell;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::{Backend, Endpoint, Method};
use crate::error::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    /// None for GET
    pub method: Option<Method>,
    pub route: String,
    pub payload: Option<Value>,
}

/// Canned JSON per route; unknown routes fail like a dropped connection
#[derive(Default)]
pub struct MockBackend {
    gets: RefCell<HashMap<String, Value>>,
    sends: RefCell<HashMap<(Method, String), Value>>,
    calls: RefCell<Vec<Call>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_get(&self, route: &str, body: Value) {
        self.gets.borrow_mut().insert(route.to_string(), body);
    }

    pub fn respond_send(&self, method: Method, route: &str, body: Value) {
        self.sends.borrow_mut().insert((method, route.to_string()), body);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn get_count(&self, route: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| c.method.is_none() && c.route == route)
            .count()
    }
}

impl Backend for MockBackend {
    async fn get<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T, ApiError> {
        let route = endpoint.to_string();
        self.calls.borrow_mut().push(Call { method: None, route: route.clone(), payload: None });
        let body = self
            .gets
            .borrow()
            .get(&route)
            .cloned()
            .ok_or_else(|| ApiError::Network(format!("no route {route}")))?;
        Ok(serde_json::from_value(body)?)
    }

    async fn send<P: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        payload: &P,
    ) -> Result<T, ApiError> {
        let route = endpoint.to_string();
        let payload = serde_json::to_value(payload).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.calls.borrow_mut().push(Call { method: Some(method), route: route.clone(), payload: Some(payload) });
        let body = self
            .sends
            .borrow()
            .get(&(method, route.clone()))
            .cloned()
            .ok_or_else(|| ApiError::Network(format!("no route {route}")))?;
        Ok(serde_json::from_value(body)?)
    }
}
