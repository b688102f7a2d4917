//! Native HTTP executor using reqwest.

use super::config::ExecutionConfig;
use super::error::RequestError;
use crate::models::{ApiResponse, HttpMethod, ResolvedRequest};
use std::collections::HashMap;
use std::time::Instant;
use url::Url;

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PATCH => reqwest::Method::PATCH,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        HttpMethod::HEAD => reqwest::Method::HEAD,
    }
}

/// Parses the resolved URL and rejects anything but `http` and `https`.
pub(crate) fn validate_url(raw: &str) -> Result<Url, RequestError> {
    let url = Url::parse(raw)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(RequestError::UnsupportedProtocol(other.to_string())),
    }
}

fn header_map(headers: &[(String, String)]) -> Result<reqwest::header::HeaderMap, RequestError> {
    use reqwest::header::{HeaderName, HeaderValue};

    let mut map = reqwest::header::HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name =
            HeaderName::from_bytes(name.as_bytes()).map_err(|e| RequestError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        let header_value =
            HeaderValue::from_str(value).map_err(|e| RequestError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
        map.append(header_name, header_value);
    }
    Ok(map)
}

/// Sends a resolved request and reads the whole response.
///
/// Non-2xx statuses are returned as responses, not errors.
pub async fn execute_request(
    request: &ResolvedRequest,
    config: &ExecutionConfig,
) -> Result<ApiResponse, RequestError> {
    let url = validate_url(&request.url)?;
    let headers = header_map(&request.headers)?;

    let client = reqwest::Client::builder()
        .timeout(config.timeout_duration())
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(|e| RequestError::BuildError(e.to_string()))?;

    let mut req_builder = client
        .request(to_reqwest_method(request.method), url)
        .headers(headers);

    if let Some(body) = &request.body {
        req_builder = req_builder.body(body.clone());
    }

    log::debug!("sending {} {}", request.method, request.url);
    let start_time = Instant::now();
    let response = req_builder.send().await?;

    let status_code = response.status().as_u16();
    let status_text = response
        .status()
        .canonical_reason()
        .unwrap_or("Unknown")
        .to_string();

    let mut response_headers = HashMap::new();
    for (name, value) in response.headers() {
        if let Ok(value_str) = value.to_str() {
            response_headers.insert(name.as_str().to_string(), value_str.to_string());
        }
    }

    let body = response.bytes().await?.to_vec();
    let duration = start_time.elapsed();
    log::debug!(
        "received {} ({} bytes) in {:?}",
        status_code,
        body.len(),
        duration
    );

    Ok(ApiResponse {
        status_code,
        status_text,
        headers: response_headers,
        body,
        duration,
    })
}
