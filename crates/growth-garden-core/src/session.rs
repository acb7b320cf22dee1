//! Explicit session passed to the API client.
//!
//! Holds everything a request needs to know about the signed-in user: the
//! API base URL, the bearer token and the preferred language. The session
//! is built once by the caller and handed to [`crate::api::ApiClient`];
//! nothing reads it from global state.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

use crate::storage::{Config, SessionStore};

/// Environment variable that overrides a stored token.
pub const TOKEN_ENV_VAR: &str = "GROWTH_GARDEN_TOKEN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ko,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ko => "ko",
        }
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "ko" => Ok(Language::Ko),
            other => Err(format!("unsupported language '{other}' (expected en or ko)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub api_base_url: String,
    pub token: Option<String>,
    pub language: Language,
    pub timeout: Duration,
}

impl Session {
    /// Anonymous session pointing at `api_base_url`.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            token: None,
            language: Language::default(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Anonymous session using the configured endpoint and language.
    pub fn from_config(config: &Config) -> Self {
        Self {
            api_base_url: config.api.base_url.clone(),
            token: None,
            language: config.ui.language,
            timeout: Duration::from_secs(config.api.timeout_secs),
        }
    }

    /// Session from config plus the persisted token, with
    /// `GROWTH_GARDEN_TOKEN` taking precedence when set.
    pub fn resolve(config: &Config, store: &SessionStore) -> Self {
        let env_token = std::env::var(TOKEN_ENV_VAR).ok().filter(|t| !t.trim().is_empty());
        let token = env_token.or_else(|| store.load().map(|stored| stored.token));
        Self {
            token,
            ..Self::from_config(config)
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
