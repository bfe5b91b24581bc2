//! Credential wrappers around [`HttpClient`](super::HttpClient).

mod api_key;
mod url_param;

pub use api_key::{APP_TOKEN_HEADER, ApiKey};
pub use url_param::{APP_TOKEN_PARAM, UrlParam};
