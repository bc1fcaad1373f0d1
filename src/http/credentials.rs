//! Request credentials
//!
//! Token acquisition belongs to the caller; this only attaches an
//! already-issued credential to each outgoing request.

use reqwest::RequestBuilder;

/// Credential attached to every request
#[derive(Clone, Default)]
pub enum Credentials {
    /// No authentication
    #[default]
    None,

    /// `Authorization: Bearer <token>`
    Bearer {
        /// The access token
        token: String,
    },

    /// Static key in a named header
    ApiKey {
        /// Header name, e.g. `api-key`
        header: String,
        /// The key value
        value: String,
    },
}

impl Credentials {
    /// Bearer token credentials
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::Bearer {
            token: token.into(),
        }
    }

    /// Apply the credential to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        match self {
            Credentials::None => req,
            Credentials::Bearer { token } => req.bearer_auth(token),
            Credentials::ApiKey { header, value } => req.header(header.as_str(), value.as_str()),
        }
    }

    /// Whether any credential is configured
    pub fn is_some(&self) -> bool {
        !matches!(self, Credentials::None)
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::None => write!(f, "None"),
            Credentials::Bearer { .. } => write!(f, "Bearer(***)"),
            Credentials::ApiKey { header, .. } => write!(f, "ApiKey({header}: ***)"),
        }
    }
}
