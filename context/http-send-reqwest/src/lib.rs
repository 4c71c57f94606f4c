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

//! Reqwest backed [`HttpSend`] implementation for the fc2 client.
//!
//! This is the default HTTP transport: it owns connection pooling and TLS,
//! honors the per-request [`RequestTimeout`] extension, and passes streaming
//! bodies through without buffering them.

use async_trait::async_trait;
use bytes::Bytes;
use fc2_core::{Error, HttpSend, RequestBody, RequestTimeout, Result};
use reqwest::Client;

/// HttpSend implementation backed by a [`reqwest::Client`].
#[derive(Debug, Default)]
pub struct ReqwestHttpSend {
    client: Client,
}

impl ReqwestHttpSend {
    /// Create a new ReqwestHttpSend with a reqwest::Client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpSend for ReqwestHttpSend {
    async fn http_send(&self, req: http::Request<RequestBody>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();

        let mut builder = self
            .client
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers);
        if let Some(RequestTimeout(timeout)) = parts.extensions.get::<RequestTimeout>() {
            builder = builder.timeout(*timeout);
        }
        builder = match body {
            RequestBody::Full(bytes) => builder.body(bytes),
            RequestBody::Streaming(stream) => builder.body(reqwest::Body::wrap_stream(stream)),
        };

        let resp = builder
            .send()
            .await
            .map_err(|e| Error::unexpected("failed to send http request").with_source(e))?;

        let mut out = http::Response::builder().status(resp.status());
        if let Some(headers) = out.headers_mut() {
            *headers = resp.headers().clone();
        }
        let body = resp
            .bytes()
            .await
            .map_err(|e| Error::unexpected("failed to read http response").with_source(e))?;

        Ok(out.body(body)?)
    }
}
