//! Actor identity forwarded by the surrounding CMS as request headers.

use std::collections::HashMap;

use axum::http::HeaderMap;

use crate::actor::Actor;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// Session variables taken from the incoming request.
#[derive(Debug, Clone, Default)]
pub struct Session {
    variables: HashMap<String, String>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(variables: HashMap<String, String>) -> Self {
        Self { variables }
    }

    /// All headers, lowercased, become session variables.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut variables = HashMap::new();
        for (name, value) in headers.iter() {
            if let Ok(v) = value.to_str() {
                variables.insert(name.as_str().to_string(), v.to_string());
            }
        }
        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(|v| v.as_str())
    }

    pub fn user_id(&self) -> Option<&str> {
        self.get(USER_ID_HEADER).filter(|id| !id.trim().is_empty())
    }

    /// The requesting actor. Without an email header the id doubles as display name.
    pub fn actor(&self) -> Option<Actor> {
        let id = self.user_id()?;
        let email = self.get(USER_EMAIL_HEADER).unwrap_or(id);
        Some(Actor::new(id, email))
    }
}
