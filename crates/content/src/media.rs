//! Media URL rewriting through the local cache proxy.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Default path of the media cache proxy.
pub const DEFAULT_CACHE_ENDPOINT: &str = "/api/cache";

/// URL-safe encoding of a remote media URL.
///
/// The encoded form is opaque to this crate; the proxy on the other end
/// decodes it.
pub trait MediaEncoder: Send + Sync {
    /// Encode `url` for use as a query parameter value.
    fn url_safe_encode(&self, url: &str) -> String;
}

/// URL-safe base64 without padding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base64UrlEncoder;

impl MediaEncoder for Base64UrlEncoder {
    fn url_safe_encode(&self, url: &str) -> String {
        URL_SAFE_NO_PAD.encode(url.as_bytes())
    }
}

/// Same-origin cache proxy for remote media.
pub struct MediaProxy {
    encoder: Box<dyn MediaEncoder>,
    endpoint: String,
}

impl MediaProxy {
    /// Create a proxy using `encoder` and the default endpoint.
    #[must_use]
    pub fn new(encoder: impl MediaEncoder + 'static) -> Self {
        Self {
            encoder: Box::new(encoder),
            endpoint: DEFAULT_CACHE_ENDPOINT.to_string(),
        }
    }

    /// Use a different proxy endpoint.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Cache endpoint path.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Proxy URL for `url`.
    #[must_use]
    pub fn proxied(&self, url: &str) -> String {
        format!("{}?url={}", self.endpoint, self.encoder.url_safe_encode(url))
    }
}

impl Default for MediaProxy {
    fn default() -> Self {
        Self::new(Base64UrlEncoder)
    }
}

impl std::fmt::Debug for MediaProxy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaProxy")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

/// Rewrite `url` to go through the proxy, or return it unchanged without one.
#[must_use]
pub fn rewrite_media_url(proxy: Option<&MediaProxy>, url: &str) -> String {
    match proxy {
        Some(proxy) => proxy.proxied(url),
        None => url.to_string(),
    }
}
