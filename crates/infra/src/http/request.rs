//! Translation of a [`RequestDescriptor`] into URL and headers
//!
//! Header precedence, lowest first:
//! 1. Descriptor headers
//! 2. `Authorization: Bearer <token>` when the call carries a credential
//! 3. `Content-Type: application/json`, always set

use courier_domain::{CourierError, RequestDescriptor, RequestMethod, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

use crate::errors::InfraError;

/// Resolve the absolute URL for `request`
///
/// # Errors
/// `MalformedTarget` when the host is empty, the path is neither empty nor
/// absolute, or the pieces do not form a valid URL.
pub fn build_url(request: &RequestDescriptor) -> Result<Url> {
    let target = request.target();
    if target.host.trim().is_empty() {
        return Err(CourierError::MalformedTarget("target host is empty".into()));
    }

    let path = request.path();
    if !path.is_empty() && !path.starts_with('/') {
        return Err(CourierError::MalformedTarget(format!("path must start with '/': {path}")));
    }

    let mut url = Url::parse(&format!("{}://{}", target.scheme, target.host))
        .map_err(|e| CourierError::from(InfraError::from(e)))?;
    if url.cannot_be_a_base() || !host_only(&url, &target.host) {
        return Err(CourierError::MalformedTarget(format!("invalid target: {target}")));
    }
    if target.port.is_some() {
        url.set_port(target.port).map_err(|()| {
            CourierError::MalformedTarget(format!("port not allowed for scheme: {target}"))
        })?;
    }
    url.set_path(path);

    let query = request.query_params();
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            match value {
                Some(value) => pairs.append_pair(key, value),
                None => pairs.append_key_only(key),
            };
        }
    }

    Ok(url)
}

/// The parsed URL carries nothing but the host: no userinfo, port, path,
/// query or fragment smuggled in through the host string.
fn host_only(url: &Url, host: &str) -> bool {
    let host_matches = match url.host_str() {
        Some(parsed) if host.is_ascii() => parsed.eq_ignore_ascii_case(host),
        Some(_) => true,
        None => false,
    };

    host_matches
        && url.username().is_empty()
        && url.password().is_none()
        && url.port().is_none()
        && url.path() == "/"
        && url.query().is_none()
        && url.fragment().is_none()
}

/// Assemble request headers for `request`
///
/// `credential` is only attached when the descriptor requires one.
///
/// # Errors
/// `MalformedTarget` when a header name or value is not valid HTTP.
pub fn build_headers(request: &RequestDescriptor, credential: Option<&str>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::with_capacity(request.headers().len() + 2);

    for (name, value) in request.headers() {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| CourierError::MalformedTarget(format!("invalid header name {name}: {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| CourierError::MalformedTarget(format!("invalid value for {name}: {e}")))?;
        headers.insert(name, value);
    }

    if let (true, Some(token)) = (request.needs_credential(), credential) {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            CourierError::MalformedTarget("access token is not a valid header value".into())
        })?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

pub(crate) fn to_method(method: RequestMethod) -> Method {
    match method {
        RequestMethod::Get => Method::GET,
        RequestMethod::Post => Method::POST,
        RequestMethod::Put => Method::PUT,
        RequestMethod::Patch => Method::PATCH,
        RequestMethod::Delete => Method::DELETE,
        RequestMethod::Head => Method::HEAD,
    }
}
