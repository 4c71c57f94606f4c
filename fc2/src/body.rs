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

//! Request payloads.
//!
//! The body variant is decided once at the call boundary instead of being
//! sniffed along the request path: each variant fixes the content type and
//! whether a content hash is computed.

use bytes::Bytes;
use fc2_core::hash::content_md5;
use fc2_core::{Error, RequestBody, Result};
use futures::stream::BoxStream;
use serde::Serialize;

/// A request payload.
pub enum Body {
    /// A UTF-8 text payload, sent as `application/octet-stream`.
    Text(String),
    /// A binary payload, sent as `application/octet-stream`.
    Binary(Bytes),
    /// A structured payload, serialized to JSON and sent as
    /// `application/json`.
    Structured(serde_json::Value),
    /// A streaming payload, sent as `application/octet-stream` without a
    /// content hash or length.
    Stream(BoxStream<'static, std::io::Result<Bytes>>),
}

impl Body {
    /// Build a structured body from any serializable value.
    pub fn structured(value: impl Serialize) -> Result<Self> {
        let value = serde_json::to_value(value)
            .map_err(|e| Error::request_invalid("failed to serialize request body").with_source(e))?;
        Ok(Body::Structured(value))
    }

    /// Resolve the variant into its wire form.
    pub(crate) fn into_wire(self) -> Result<WireBody> {
        let (bytes, content_type) = match self {
            Body::Text(text) => (Bytes::from(text), "application/octet-stream"),
            Body::Binary(bytes) => (bytes, "application/octet-stream"),
            Body::Structured(value) => {
                let buf = serde_json::to_vec(&value).map_err(|e| {
                    Error::request_invalid("failed to serialize request body").with_source(e)
                })?;
                (Bytes::from(buf), "application/json")
            }
            Body::Stream(stream) => {
                return Ok(WireBody {
                    body: RequestBody::Streaming(stream),
                    content_type: "application/octet-stream",
                    content_md5: None,
                    content_length: None,
                });
            }
        };

        let md5 = content_md5(&bytes);
        let len = bytes.len() as u64;
        Ok(WireBody {
            body: RequestBody::Full(bytes),
            content_type,
            content_md5: Some(md5),
            content_length: Some(len),
        })
    }
}

impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Body::Binary(bytes) => f.debug_tuple("Binary").field(&bytes.len()).finish(),
            Body::Structured(value) => f.debug_tuple("Structured").field(value).finish(),
            Body::Stream(_) => f.debug_tuple("Stream").finish(),
        }
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Bytes> for Body {
    fn from(bytes: Bytes) -> Self {
        Body::Binary(bytes)
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Binary(Bytes::from(bytes))
    }
}

impl From<&[u8]> for Body {
    fn from(bytes: &[u8]) -> Self {
        Body::Binary(Bytes::copy_from_slice(bytes))
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Structured(value)
    }
}

/// The resolved wire form of a [`Body`].
pub(crate) struct WireBody {
    pub body: RequestBody,
    pub content_type: &'static str,
    pub content_md5: Option<String>,
    pub content_length: Option<u64>,
}
