use std::fmt;

pub const DEFAULT_UPSTREAM_URL: &str = "https://integrate.api.nvidia.com/v1/chat/completions";

/// Relay configuration, fixed at startup.
///
/// The credential is the only secret in the system: it stays in memory,
/// is attached to upstream requests only, and is never logged or echoed
/// in a response body.
#[derive(Clone)]
pub struct RelayConfig {
    pub upstream_url: String,
    pub api_key: Option<String>,
}

impl RelayConfig {
    pub fn new(upstream_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            upstream_url: upstream_url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Read the credential from `NVIDIA_API_KEY`.
    pub fn from_env(upstream_url: impl Into<String>) -> Self {
        Self::new(upstream_url, std::env::var("NVIDIA_API_KEY").ok())
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

// Manual Debug so the credential can never leak through formatting.
impl fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RelayConfig")
            .field("upstream_url", &self.upstream_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
