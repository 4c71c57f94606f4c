// Copyright 2026 the fc2 authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The Function Compute client and its request envelope.

use std::time::Duration;

use fc2_core::{Context, Error, RequestTimeout, Result};
use fc2_core::{time, SocketChannel};
use fc2_http_send_reqwest::ReqwestHttpSend;
use http::header::{
    HeaderName, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE, DATE, HOST,
    USER_AGENT,
};
use http::{HeaderMap, Method, Uri};
use log::debug;

use crate::body::Body;
use crate::config::Config;
use crate::constants::*;
use crate::response::{Data, Response};
use crate::sign;

/// Per-call behavior flags for [`Client::request`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestOptions {
    /// Return the response body as raw bytes instead of decoding it, unless
    /// the response signals an error through `x-fc-error-type`.
    pub raw_buf: bool,
}

/// Client for one Function Compute account in one region.
///
/// All configuration is resolved at construction: two clients with different
/// regions or endpoints never interfere. The client is cheap to clone and
/// safe to share across tasks.
///
/// ```no_run
/// use fc2::{Client, Config};
///
/// # async fn example() -> fc2::Result<()> {
/// let client = Client::new(
///     "account-id",
///     Config {
///         access_key_id: Some("ak-id".to_string()),
///         access_key_secret: Some("ak-secret".to_string()),
///         region: Some("cn-shanghai".to_string()),
///         ..Default::default()
///     },
/// )?;
/// let services = client.list_services(&Default::default(), None).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    ctx: Context,
    account_id: String,
    access_key_id: String,
    access_key_secret: String,
    security_token: Option<String>,
    endpoint: String,
    host: String,
    timeout: Duration,
    user_agent: String,
    default_headers: Vec<(HeaderName, HeaderValue)>,
}

impl Client {
    /// Create a client with the default reqwest transport.
    pub fn new(account_id: &str, config: Config) -> Result<Self> {
        Self::with_context(
            account_id,
            config,
            Context::new().with_http_send(ReqwestHttpSend::default()),
        )
    }

    /// Create a client dispatching through the given context.
    ///
    /// This is the seam for custom transports: anything implementing
    /// `HttpSend` (or `SocketConnect` for instance exec) can be plugged in.
    pub fn with_context(account_id: &str, config: Config, ctx: Context) -> Result<Self> {
        if account_id.is_empty() {
            return Err(Error::config_invalid("account id must be passed in"));
        }

        let access_key_id = match config.access_key_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                return Err(Error::config_invalid(
                    "config.access_key_id must be passed in",
                ))
            }
        };

        // STS keys are temporary credentials; the token travels with every
        // request in `x-fc-security-token`.
        let security_token = if access_key_id.starts_with(STS_KEY_PREFIX) {
            match config.security_token.as_deref() {
                Some(token) if !token.is_empty() => Some(token.to_string()),
                _ => {
                    return Err(Error::config_invalid(
                        "config.security_token must be passed in for STS",
                    ))
                }
            }
        } else {
            config.security_token.filter(|t| !t.is_empty())
        };

        let access_key_secret = match config.access_key_secret.as_deref() {
            Some(secret) if !secret.is_empty() => secret.to_string(),
            _ => {
                return Err(Error::config_invalid(
                    "config.access_key_secret must be passed in",
                ))
            }
        };

        let (endpoint, host) = match config.endpoint.as_deref() {
            Some(endpoint) if !endpoint.is_empty() => {
                let uri: Uri = endpoint
                    .parse()
                    .map_err(|e| Error::config_invalid("config.endpoint is invalid").with_source(e))?;
                let host = uri
                    .authority()
                    .ok_or_else(|| Error::config_invalid("config.endpoint has no host"))?
                    .to_string();
                (endpoint.trim_end_matches('/').to_string(), host)
            }
            _ => {
                let region = match config.region.as_deref() {
                    Some(region) if !region.is_empty() => region,
                    _ => return Err(Error::config_invalid("config.region must be passed in")),
                };
                let protocol = if config.secure { "https" } else { "http" };
                let internal = if config.internal { "-internal" } else { "" };
                let host = format!("{account_id}.{region}{internal}.{ENDPOINT_DOMAIN}");
                (format!("{protocol}://{host}"), host)
            }
        };

        let mut default_headers = Vec::with_capacity(config.headers.len());
        for (name, value) in &config.headers {
            let name: HeaderName = name
                .parse()
                .map_err(|e| Error::config_invalid("config.headers has an invalid name").with_source(e))?;
            let value: HeaderValue = value
                .parse()
                .map_err(|e| Error::config_invalid("config.headers has an invalid value").with_source(e))?;
            default_headers.push((name, value));
        }

        Ok(Self {
            ctx,
            account_id: account_id.to_string(),
            access_key_id,
            access_key_secret,
            security_token,
            endpoint,
            host,
            timeout: config.timeout,
            user_agent: format!(
                "OS({}/{}) SDK(fc2@v{})",
                std::env::consts::OS,
                std::env::consts::ARCH,
                env!("CARGO_PKG_VERSION")
            ),
            default_headers,
        })
    }

    /// The resolved endpoint, e.g. `https://123.cn-shanghai.fc.aliyuncs.com`.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The account id this client operates on.
    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    /// Baseline headers carried by every request.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            DATE,
            time::format_http_date(time::now()).parse::<HeaderValue>()?,
        );
        headers.insert(HOST, self.host.parse::<HeaderValue>()?);
        headers.insert(USER_AGENT, self.user_agent.parse::<HeaderValue>()?);
        headers.insert(
            HEADER_ACCOUNT_ID,
            self.account_id.parse::<HeaderValue>()?,
        );
        if let Some(token) = &self.security_token {
            headers.insert(HEADER_SECURITY_TOKEN, token.parse::<HeaderValue>()?);
        }
        for (name, value) in &self.default_headers {
            headers.insert(name.clone(), value.clone());
        }
        Ok(headers)
    }

    /// Carry out one request/response cycle.
    ///
    /// `path` is service-relative (no API version prefix). Query parameters
    /// join the string-to-sign only when `path` falls under the proxy
    /// namespace; see [`crate::get_signature`].
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(String, String)]>,
        body: Option<Body>,
        headers: Option<HeaderMap>,
        opts: RequestOptions,
    ) -> Result<Response> {
        let versioned_path = format!("/{API_VERSION}{path}");
        let mut url = format!("{}{versioned_path}", self.endpoint);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            let qs = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&qs);
        }

        let mut all_headers = self.build_headers()?;
        if let Some(headers) = headers {
            for (name, value) in headers.iter() {
                all_headers.insert(name.clone(), value.clone());
            }
        }

        let wire_body = match body {
            Some(body) => {
                debug!("request body: {body:?}");
                let wire = body.into_wire()?;
                all_headers.insert(CONTENT_TYPE, HeaderValue::from_static(wire.content_type));
                if let Some(len) = wire.content_length {
                    all_headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
                }
                if let Some(md5) = wire.content_md5 {
                    all_headers.insert("content-md5", md5.parse::<HeaderValue>()?);
                }
                wire.body
            }
            None => Default::default(),
        };

        // Only proxied invocations sign their query string; the gateway may
        // rewrite it in transit on those paths.
        let signed_queries = if path.starts_with(PROXY_PATH_PREFIX) {
            Some(query.unwrap_or(&[]))
        } else {
            None
        };
        let authorization = sign::get_signature(
            &self.access_key_id,
            &self.access_key_secret,
            &method,
            &versioned_path,
            &all_headers,
            signed_queries,
        );
        let mut authorization = authorization.parse::<HeaderValue>()?;
        authorization.set_sensitive(true);
        all_headers.insert(AUTHORIZATION, authorization);

        debug!("request: {method} {url}");

        let mut req = http::Request::builder().method(method.clone()).uri(&url);
        if let Some(h) = req.headers_mut() {
            *h = all_headers;
        }
        let mut req = req.body(wire_body)?;
        req.extensions_mut().insert(RequestTimeout(self.timeout));

        let resp = self.ctx.http_send(req).await?;

        let status = resp.status();
        let (parts, body_bytes) = resp.into_parts();
        debug!("response status: {status}");

        let content_type = parts
            .headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        // Responses flagged with x-fc-error-type carry an error document
        // produced by user code; those are always decoded, never raw.
        let is_error_doc = parts.headers.contains_key(HEADER_ERROR_TYPE);

        let data = if opts.raw_buf && !is_error_doc {
            Data::Binary(body_bytes)
        } else {
            let text = String::from_utf8_lossy(&body_bytes).into_owned();
            if content_type.starts_with("application/json") {
                let value = serde_json::from_str(&text).map_err(|e| {
                    Error::decode(format!("{method} {path} returned unparsable json"))
                        .with_source(e)
                })?;
                Data::Json(value)
            } else {
                Data::Text(text)
            }
        };

        if !status.is_success() {
            let request_id = parts
                .headers
                .get(HEADER_REQUEST_ID)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();

            // The service has shipped both casings of the error fields.
            let (code, message) = match &data {
                Data::Json(v) => (
                    json_str(v, "ErrorCode").or_else(|| json_str(v, "errorCode")),
                    json_str(v, "ErrorMessage").or_else(|| json_str(v, "errorMessage")),
                ),
                Data::Text(text) => (None, Some(text.clone())),
                Data::Binary(_) => (None, None),
            };

            let mut err = Error::api(format!(
                "{method} {path} failed with {}. requestid: {request_id}, message: {}.",
                status.as_u16(),
                message.unwrap_or_default()
            ))
            .with_status(status)
            .with_request_id(request_id);
            if let Some(code) = code {
                err = err.with_error_code(code);
            }
            return Err(err);
        }

        Ok(Response {
            headers: parts.headers,
            data,
        })
    }

    /// Issue a GET request.
    pub async fn get(
        &self,
        path: &str,
        query: Option<&[(String, String)]>,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        self.request(Method::GET, path, query, None, headers, Default::default())
            .await
    }

    /// Issue a POST request.
    pub async fn post(
        &self,
        path: &str,
        body: Body,
        headers: Option<HeaderMap>,
        query: Option<&[(String, String)]>,
        opts: RequestOptions,
    ) -> Result<Response> {
        self.request(Method::POST, path, query, Some(body), headers, opts)
            .await
    }

    /// Issue a PUT request.
    pub async fn put(
        &self,
        path: &str,
        body: Body,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        self.request(Method::PUT, path, None, Some(body), headers, Default::default())
            .await
    }

    /// Issue a DELETE request.
    pub async fn delete(
        &self,
        path: &str,
        query: Option<&[(String, String)]>,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        self.request(Method::DELETE, path, query, None, headers, Default::default())
            .await
    }

    /// Open a duplex channel against a signed upgrade request.
    ///
    /// Unlike plain requests, socket upgrades always sign their query
    /// parameters.
    pub(crate) async fn open_socket(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Box<dyn SocketChannel>> {
        let versioned_path = format!("/{API_VERSION}{path}");

        let scheme_endpoint = if let Some(rest) = self.endpoint.strip_prefix("https://") {
            format!("wss://{rest}")
        } else if let Some(rest) = self.endpoint.strip_prefix("http://") {
            format!("ws://{rest}")
        } else {
            return Err(Error::request_invalid(format!(
                "endpoint {} has no http scheme",
                self.endpoint
            )));
        };

        let mut url = format!("{scheme_endpoint}{versioned_path}");
        if !query.is_empty() {
            let qs = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push('?');
            url.push_str(&qs);
        }

        let mut headers = self.build_headers()?;
        let authorization = sign::get_signature(
            &self.access_key_id,
            &self.access_key_secret,
            &Method::GET,
            &versioned_path,
            &headers,
            Some(query),
        );
        let mut authorization = authorization.parse::<HeaderValue>()?;
        authorization.set_sensitive(true);
        headers.insert(AUTHORIZATION, authorization);

        debug!("socket upgrade: {url}");

        let mut req = http::Request::builder().method(Method::GET).uri(&url);
        if let Some(h) = req.headers_mut() {
            *h = headers;
        }
        let req = req.body(())?;

        self.ctx.socket_connect(req).await
    }
}

fn json_str(value: &serde_json::Value, key: &str) -> Option<String> {
    value.get(key).and_then(|v| v.as_str()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn config() -> Config {
        Config {
            access_key_id: Some("akid".to_string()),
            access_key_secret: Some("aksecret".to_string()),
            region: Some("cn-shanghai".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_endpoint_derivation() {
        let client = Client::with_context("123456", config(), Context::new()).unwrap();
        assert_eq!(client.endpoint(), "http://123456.cn-shanghai.fc.aliyuncs.com");

        let client = Client::with_context(
            "123456",
            Config {
                secure: true,
                internal: true,
                ..config()
            },
            Context::new(),
        )
        .unwrap();
        assert_eq!(
            client.endpoint(),
            "https://123456.cn-shanghai-internal.fc.aliyuncs.com"
        );
    }

    #[test]
    fn test_explicit_endpoint_wins() {
        let client = Client::with_context(
            "123456",
            Config {
                endpoint: Some("http://localhost:8080".to_string()),
                region: None,
                ..config()
            },
            Context::new(),
        )
        .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8080");
        assert_eq!(client.host, "localhost:8080");
    }

    #[test_case(Config { access_key_id: None, ..config() }, "access_key_id"; "missing key id")]
    #[test_case(Config { access_key_secret: None, ..config() }, "access_key_secret"; "missing secret")]
    #[test_case(Config { region: None, ..config() }, "region"; "missing region")]
    #[test_case(
        Config { access_key_id: Some("STSfake".to_string()), ..config() },
        "security_token";
        "sts without token"
    )]
    fn test_constructor_validation(cfg: Config, expected: &str) {
        let err = Client::with_context("123456", cfg, Context::new()).unwrap_err();
        assert_eq!(err.kind(), fc2_core::ErrorKind::ConfigInvalid);
        assert!(err.to_string().contains(expected), "{err}");
    }

    #[test]
    fn test_empty_account_id_rejected() {
        let err = Client::with_context("", config(), Context::new()).unwrap_err();
        assert!(err.to_string().contains("account id"));
    }

    #[test]
    fn test_sts_key_keeps_token() {
        let client = Client::with_context(
            "123456",
            Config {
                access_key_id: Some("STSkey".to_string()),
                security_token: Some("token".to_string()),
                ..config()
            },
            Context::new(),
        )
        .unwrap();
        assert_eq!(client.security_token.as_deref(), Some("token"));
    }

    #[test]
    fn test_build_headers_baseline() {
        let client = Client::with_context("123456", config(), Context::new()).unwrap();
        let headers = client.build_headers().unwrap();
        assert_eq!(headers.get(ACCEPT).unwrap(), "application/json");
        assert_eq!(
            headers.get(HOST).unwrap(),
            "123456.cn-shanghai.fc.aliyuncs.com"
        );
        assert_eq!(headers.get(HEADER_ACCOUNT_ID).unwrap(), "123456");
        assert!(headers.contains_key(DATE));
        assert!(headers.contains_key(USER_AGENT));
        assert!(!headers.contains_key(HEADER_SECURITY_TOKEN));
    }

    #[test]
    fn test_default_headers_merged() {
        let mut cfg = config();
        cfg.headers
            .insert("x-fc-invocation-type".to_string(), "Async".to_string());
        let client = Client::with_context("123456", cfg, Context::new()).unwrap();
        let headers = client.build_headers().unwrap();
        assert_eq!(headers.get("x-fc-invocation-type").unwrap(), "Async");
    }
}
