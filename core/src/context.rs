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

use crate::http::{HttpSend, NoopHttpSend};
use crate::socket::{NoopSocketConnect, SocketChannel, SocketConnect};
use crate::{RequestBody, Result};
use bytes::Bytes;
use std::fmt::Debug;
use std::sync::Arc;

/// Context holds the transport collaborators used to carry out requests.
///
/// Unconfigured components fall back to no-op implementations that return
/// errors when called, so a context is always safe to construct.
#[derive(Clone)]
pub struct Context {
    http: Arc<dyn HttpSend>,
    socket: Arc<dyn SocketConnect>,
}

impl Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("http", &self.http)
            .field("socket", &self.socket)
            .finish()
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    /// Create a new Context with no-op implementations.
    pub fn new() -> Self {
        Self {
            http: Arc::new(NoopHttpSend),
            socket: Arc::new(NoopSocketConnect),
        }
    }

    /// Replace the HTTP client implementation.
    pub fn with_http_send(mut self, http: impl HttpSend) -> Self {
        self.http = Arc::new(http);
        self
    }

    /// Replace the socket transport implementation.
    pub fn with_socket_connect(mut self, socket: impl SocketConnect) -> Self {
        self.socket = Arc::new(socket);
        self
    }

    /// Send an http request and return the response.
    #[inline]
    pub async fn http_send(&self, req: http::Request<RequestBody>) -> Result<http::Response<Bytes>> {
        self.http.http_send(req).await
    }

    /// Open a duplex channel for the given upgrade request.
    #[inline]
    pub async fn socket_connect(&self, req: http::Request<()>) -> Result<Box<dyn SocketChannel>> {
        self.socket.socket_connect(req).await
    }
}
