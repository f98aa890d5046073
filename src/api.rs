/*
 * Copyright (c) 2025 Craig Hamilton and Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::config::ClientConfig;
use crate::errors::ImmichError;
use crate::logging::ClientLogger;
use crate::macros::{client_debug, client_error};
use bytes::Bytes;
use num_enum::TryFromPrimitive;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "x-api-key";

/// This can be filter types as well as other parameters the specific API expects
pub type ApiParams<'a> = [(&'a str, &'a str)];

/// Response codes the Immich server is known to return
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u16)]
pub enum ResponseCode {
    // Good Codes
    Ok = 200,
    Created = 201,
    Accepted = 202,
    NoContent = 204,

    // Failing Codes
    BadRequest = 400,
    Unauthorized = 401,
    Forbidden = 403,
    NotFound = 404,
    MethodNotAllowed = 405,
    Conflict = 409,
    UnprocessableEntity = 422,
    TooManyRequests = 429,
    InternalServerError = 500,
    BadGateway = 502,
    ServiceUnavailable = 503,
    GatewayTimeout = 504,
}

/// Raw body of a binary response along with its content type
#[derive(Debug)]
pub struct RawBody {
    pub content_type: String,
    pub data: Bytes,
}

/// Directly communicates with the API.
pub struct ApiClient {
    base_url: String,
    https_client: reqwest::Client,
    get_retries: u32,
    pub(crate) logger: ClientLogger,
}

impl ApiClient {
    /// Creates a new client instance from the provided configuration
    pub fn new(config: &ClientConfig) -> Result<Self, ImmichError> {
        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| ImmichError::Config("API key is not a valid header value".into()))?;
        api_key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(API_KEY_HEADER, api_key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.clone(),
            https_client: builder.build()?,
            get_retries: config.get_retries,
            logger: ClientLogger::new(config.logger.clone(), config.log_level),
        })
    }

    /// Full url for an API path such as `/api/albums`
    pub fn url(&self, path: &str, params: Option<&ApiParams<'_>>) -> Result<url::Url, ImmichError> {
        let full = format!("{}{}", self.base_url, path);
        Ok(params.map_or(url::Url::parse(&full), |v| {
            url::Url::parse_with_params(&full, v)
        })?)
    }

    // Issues the request. Only GETs are retried and only on transport errors.
    async fn send(
        &self,
        method: Method,
        path: &str,
        params: Option<&ApiParams<'_>>,
        body: Option<Vec<u8>>,
    ) -> Result<Response, ImmichError> {
        let req_url = self.url(path, params)?;
        client_debug!(self.logger, "{} {}", method, req_url);

        let mut attempt = 0;
        loop {
            let mut req = self.https_client.request(method.clone(), req_url.clone());
            if let Some(body) = &body {
                req = req.body(body.clone());
            }
            match req.send().await {
                Ok(resp) => return Ok(resp),
                Err(err) if method == Method::GET && attempt < self.get_retries => {
                    attempt += 1;
                    client_debug!(
                        self.logger,
                        "Retrying {} ({}/{}) after: {}",
                        req_url,
                        attempt,
                        self.get_retries,
                        err
                    );
                }
                Err(err) => {
                    client_error!(self.logger, "{} {} failed: {}", method, req_url, err);
                    return Err(err.into());
                }
            }
        }
    }

    // Anything not in `expected` is logged along with the body and returned as an error.
    // The code table only names the expected codes, any other status is an ApiResponse.
    async fn check(
        &self,
        resp: Response,
        expected: &[ResponseCode],
    ) -> Result<(ResponseCode, Response), ImmichError> {
        let status = resp.status().as_u16();
        if let Ok(code) = ResponseCode::try_from(status) {
            if expected.contains(&code) {
                return Ok((code, resp));
            }
        }

        let url = resp.url().clone();
        let body = match resp.text().await {
            Ok(body) => body,
            Err(err) => {
                client_debug!(self.logger, "Failed to read response body from {}: {}", url, err);
                String::new()
            }
        };
        client_error!(self.logger, "Request to {} failed with status code {}", url, status);
        client_error!(self.logger, "{}", body);
        Err(ImmichError::ApiResponse(status, body))
    }

    /// Performs a get request. Every status but 200 is an error.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<T, ImmichError> {
        let resp = self.send(Method::GET, path, params, None).await?;
        let (_, resp) = self.check(resp, &[ResponseCode::Ok]).await?;
        let data = resp.bytes().await?;
        client_debug!(self.logger, "Response: {} bytes", data.len());
        Ok(serde_json::from_slice(&data)?)
    }

    /// Performs a get request for a single object. A 404 is returned as `None`.
    pub async fn get_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Option<T>, ImmichError> {
        let resp = self.send(Method::GET, path, params, None).await?;
        if Self::is_not_found(&resp) {
            client_debug!(self.logger, "Not found: {}", resp.url());
            return Ok(None);
        }
        let (_, resp) = self.check(resp, &[ResponseCode::Ok]).await?;
        let data = resp.bytes().await?;
        client_debug!(self.logger, "Response: {} bytes", data.len());
        Ok(Some(serde_json::from_slice(&data)?))
    }

    /// Performs a get request for the binary content of a single object. A 404 is returned
    /// as `None`.
    pub async fn get_raw_opt(
        &self,
        path: &str,
        params: Option<&ApiParams<'_>>,
    ) -> Result<Option<RawBody>, ImmichError> {
        let resp = self.send(Method::GET, path, params, None).await?;
        if Self::is_not_found(&resp) {
            client_debug!(self.logger, "Not found: {}", resp.url());
            return Ok(None);
        }
        let (_, resp) = self.check(resp, &[ResponseCode::Ok]).await?;
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let data = resp.bytes().await?;
        client_debug!(self.logger, "Response: {} bytes of {}", data.len(), content_type);
        Ok(Some(RawBody { content_type, data }))
    }

    fn is_not_found(resp: &Response) -> bool {
        resp.status().as_u16() == ResponseCode::NotFound as u16
    }

    /// Sends `data` and parses the JSON the server responds with
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        data: Vec<u8>,
        expected: &[ResponseCode],
    ) -> Result<T, ImmichError> {
        let resp = self.send(method, path, None, Some(data)).await?;
        let (_, resp) = self.check(resp, expected).await?;
        let data = resp.bytes().await?;
        client_debug!(self.logger, "Response: {} bytes", data.len());
        Ok(serde_json::from_slice(&data)?)
    }

    /// Sends the request and only looks at the response code
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        data: Option<Vec<u8>>,
        expected: &[ResponseCode],
    ) -> Result<ResponseCode, ImmichError> {
        let resp = self.send(method, path, None, data).await?;
        let (code, _) = self.check(resp, expected).await?;
        Ok(code)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Path segment for an id, escaped so it can't change the path
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    fn api_client() -> ApiClient {
        let config =
            ClientConfig::new("https://immich.mydomain.com/", "key").log_level(LevelFilter::Off);
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn url_joins_base_and_path() {
        let url = api_client().url("/api/albums", None).unwrap();
        assert_eq!(url.as_str(), "https://immich.mydomain.com/api/albums");
    }

    #[test]
    fn url_encodes_params() {
        let params = vec![("assetId", "a b"), ("shared", "true")];
        let url = api_client().url("/api/albums", Some(params.as_slice())).unwrap();
        assert_eq!(
            url.as_str(),
            "https://immich.mydomain.com/api/albums?assetId=a+b&shared=true"
        );
    }

    #[test]
    fn segments_are_escaped() {
        assert_eq!(segment("0e1f-22"), "0e1f-22");
        assert_eq!(segment("../jobs"), "..%2Fjobs");
    }

    #[test]
    fn invalid_api_key_is_a_config_error() {
        let config = ClientConfig::new("https://immich.mydomain.com", "bad\nkey");
        assert!(matches!(ApiClient::new(&config), Err(ImmichError::Config(_))));
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert!(ResponseCode::try_from(204).is_ok());
        assert!(ResponseCode::try_from(418).is_err());
    }
}
