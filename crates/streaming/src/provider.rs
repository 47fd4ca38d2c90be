use scene::entity::Entity;

use crate::payload::{PayloadError, parse_locations};

/// Errors surfaced by the injected data providers.
///
/// A fetch failure is reported inline and never retried automatically; the
/// map simply renders with zero entities until the next explicit fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a body (network, timeout, ...).
    Transport(String),
    /// The endpoint answered but reported failure.
    Endpoint(String),
    /// The body could not be decoded.
    Decode(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Transport(msg) => write!(f, "transport error: {msg}"),
            FetchError::Endpoint(msg) => write!(f, "endpoint error: {msg}"),
            FetchError::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl From<PayloadError> for FetchError {
    fn from(e: PayloadError) -> Self {
        match e {
            PayloadError::Json(msg) => FetchError::Decode(msg),
            PayloadError::Endpoint(msg) => FetchError::Endpoint(msg),
        }
    }
}

/// Source of the full entity set (`GET /api/locations` or equivalent).
///
/// The core owns nothing about transport; hosts inject an implementation.
pub trait LocationProvider {
    fn fetch(&self) -> Result<Vec<Entity>, FetchError>;
}

/// Provider over a captured response body. Used by tests and the demo app.
#[derive(Debug, Clone)]
pub struct FixtureProvider {
    body: String,
}

impl FixtureProvider {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }
}

impl LocationProvider for FixtureProvider {
    fn fetch(&self) -> Result<Vec<Entity>, FetchError> {
        Ok(parse_locations(&self.body)?)
    }
}
