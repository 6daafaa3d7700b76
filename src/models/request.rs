//! Request specification shared by every attempt of a load run

use crate::error::{AppError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use std::collections::BTreeMap;
use url::Url;

/// Header name to ordered list of values
pub type Headers = BTreeMap<String, Vec<String>>;

/// Immutable description of the request fired on every attempt
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl RequestSpec {
    /// Build the request from raw caller input.
    ///
    /// Fails for an invalid method token, a host that is not an absolute
    /// http(s) URL, or a header name/value that cannot go on the wire.
    pub fn build(method: &str, host: &str, headers: Option<&Headers>, body: Option<&[u8]>) -> Result<Self> {
        let method = Method::from_bytes(method.as_bytes())
            .map_err(|e| AppError::parse(format!("create request: invalid method '{}': {}", method, e)))?;

        let url = Url::parse(host)
            .map_err(|e| AppError::parse(format!("create request: invalid host '{}': {}", host, e)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::parse(format!(
                "create request: unsupported scheme '{}' in host '{}'",
                url.scheme(),
                host
            )));
        }

        let headers = match headers {
            Some(headers) => to_header_map(headers)?,
            None => HeaderMap::new(),
        };

        Ok(Self {
            method,
            url,
            headers,
            body: body.map(<[u8]>::to_vec),
        })
    }
}

fn to_header_map(headers: &Headers) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();

    for (name, values) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| AppError::parse(format!("create request: invalid header name '{}': {}", name, e)))?;

        for value in values {
            let header_value = HeaderValue::from_str(value)
                .map_err(|e| AppError::parse(format!("create request: invalid value for header '{}': {}", name, e)))?;
            map.append(header_name.clone(), header_value);
        }
    }

    Ok(map)
}
