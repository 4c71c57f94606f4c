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

use crate::{RequestBody, Result};
use bytes::Bytes;
use std::fmt::Debug;

/// HttpSend is used to dispatch one fully built, signed request.
///
/// Implementations own connection pooling, TLS and timeouts; the client
/// performs a single attempt per call and never retries.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<RequestBody>) -> Result<http::Response<Bytes>>;
}

/// NoopHttpSend is a no-op implementation that always returns an error.
///
/// This is used when no HTTP client is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHttpSend;

#[async_trait::async_trait]
impl HttpSend for NoopHttpSend {
    async fn http_send(&self, _req: http::Request<RequestBody>) -> Result<http::Response<Bytes>> {
        Err(crate::Error::unexpected(
            "HTTP sending not supported: no HTTP client configured",
        ))
    }
}
