//! Backend endpoint configuration.
//!
//! The base URL comes from the frontend (flag or environment); an unset or
//! empty value falls back to [`DEFAULT_BASE_URL`]. The synthesize path is
//! fixed — the service exposes exactly one operation.

use url::Url;

use crate::error::SynthResult;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "RETROVOX_BACKEND_URL";

/// Default backend address when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9452";

/// Fixed path of the synthesize endpoint, appended to the base URL.
pub(crate) const SYNTHESIZE_PATH: &str = "/api/synthesize";

/// Configuration for the synthesis client.
#[derive(Debug, Clone)]
pub struct SynthConfig {
    /// Base URL of the synthesis backend.
    pub base_url: Url,
}

impl SynthConfig {
    /// Create a config from an already-parsed base URL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    /// Parse `base` into a config.
    pub fn from_base_url(base: &str) -> SynthResult<Self> {
        Ok(Self::new(Url::parse(base)?))
    }

    /// Resolve a possibly-absent, possibly-empty configured base URL.
    ///
    /// Unset and empty both fall back to [`DEFAULT_BASE_URL`] — the
    /// original deployment treats an empty setting as "use the default
    /// collaborator address".
    pub fn resolve(configured: Option<String>) -> SynthResult<Self> {
        match configured.as_deref().map(str::trim) {
            Some(base) if !base.is_empty() => Self::from_base_url(base),
            _ => Self::from_base_url(DEFAULT_BASE_URL),
        }
    }

    /// Resolve the base URL from [`BACKEND_URL_ENV`].
    pub fn from_env() -> SynthResult<Self> {
        Self::resolve(std::env::var(BACKEND_URL_ENV).ok())
    }

    /// Full URL of the synthesize endpoint.
    ///
    /// Plain concatenation rather than [`Url::join`]: a base URL carrying a
    /// path prefix (e.g. behind a reverse proxy) must keep that prefix, and
    /// `join` would replace it.
    pub fn synthesize_url(&self) -> SynthResult<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Ok(Url::parse(&format!("{base}{SYNTHESIZE_PATH}"))?)
    }
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::new(Url::parse(DEFAULT_BASE_URL).expect("default URL is valid"))
    }
}
