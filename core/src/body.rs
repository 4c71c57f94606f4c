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

use bytes::Bytes;
use futures::stream::BoxStream;
use std::fmt::Debug;
use std::time::Duration;

/// The payload carried by an outgoing request.
///
/// Buffered payloads are hashed and measured before dispatch; streaming
/// payloads are handed to the transport untouched, since hashing a stream
/// would require buffering it first.
pub enum RequestBody {
    /// A fully buffered payload. May be empty.
    Full(Bytes),
    /// A streaming payload, sent as-is.
    Streaming(BoxStream<'static, std::io::Result<Bytes>>),
}

impl RequestBody {
    /// An empty buffered payload.
    pub fn empty() -> Self {
        RequestBody::Full(Bytes::new())
    }

    /// A buffered payload.
    pub fn full(bytes: impl Into<Bytes>) -> Self {
        RequestBody::Full(bytes.into())
    }

    /// A streaming payload.
    pub fn streaming(stream: BoxStream<'static, std::io::Result<Bytes>>) -> Self {
        RequestBody::Streaming(stream)
    }

    /// Whether this payload is a stream.
    pub fn is_streaming(&self) -> bool {
        matches!(self, RequestBody::Streaming(_))
    }
}

impl Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Full(bytes) => f.debug_tuple("Full").field(&bytes.len()).finish(),
            RequestBody::Streaming(_) => f.debug_tuple("Streaming").finish(),
        }
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        RequestBody::Full(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        RequestBody::Full(bytes.into())
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        RequestBody::Full(s.into())
    }
}

/// Per-request timeout, carried in [`http::Request::extensions`].
///
/// Transports that support deadlines should honor it; the trait signature
/// itself stays free of transport policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTimeout(pub Duration);
