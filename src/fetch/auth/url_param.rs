use crate::fetch::client::HttpClient;
use async_trait::async_trait;

/// Query parameter the SPARCS query service accepts application tokens in.
pub const APP_TOKEN_PARAM: &str = "$$app_token";

/// An [`HttpClient`] wrapper that appends an API key as a URL query parameter.
///
/// `param_name` is the query parameter name and `key` is its value.
pub struct UrlParam<C> {
    pub inner: C,
    pub param_name: String,
    pub key: String,
}

impl<C> UrlParam<C> {
    /// Sends the key as `?$$app_token=<key>`.
    pub fn app_token(inner: C, key: &str) -> Self {
        Self {
            inner,
            param_name: APP_TOKEN_PARAM.to_string(),
            key: key.to_string(),
        }
    }
}

#[async_trait]
impl<C: HttpClient> HttpClient for UrlParam<C> {
    async fn execute(&self, mut req: reqwest::Request) -> reqwest::Result<reqwest::Response> {
        req.url_mut()
            .query_pairs_mut()
            .append_pair(&self.param_name, &self.key);
        self.inner.execute(req).await
    }
}
