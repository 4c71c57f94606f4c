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

//! Response decoding.

use bytes::Bytes;
use fc2_core::{Error, Result};
use http::HeaderMap;
use serde::de::DeserializeOwned;

/// A decoded response body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data {
    /// A parsed `application/json` body.
    Json(serde_json::Value),
    /// A non-JSON body read as text.
    Text(String),
    /// Raw bytes, returned when the caller asked for them.
    Binary(Bytes),
}

impl Data {
    /// The body as a string slice, when it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Data::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The parsed JSON value, when the body was JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Data::Json(v) => Some(v),
            _ => None,
        }
    }

    /// The body as bytes, regardless of variant.
    pub fn into_bytes(self) -> Bytes {
        match self {
            Data::Json(v) => Bytes::from(v.to_string()),
            Data::Text(s) => Bytes::from(s),
            Data::Binary(b) => b,
        }
    }
}

/// A completed API response: the headers and the decoded body.
#[derive(Debug, Clone)]
pub struct Response<T = Data> {
    /// Response headers, including `x-fc-request-id`.
    pub headers: HeaderMap,
    /// The decoded body.
    pub data: T,
}

impl<T> Response<T> {
    /// The request-tracing id assigned by the service, if present.
    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get(crate::constants::HEADER_REQUEST_ID)
            .and_then(|v| v.to_str().ok())
    }
}

impl Response<Data> {
    /// Decode the JSON body into a typed model, keeping the headers.
    pub(crate) fn decode_into<T: DeserializeOwned>(self) -> Result<Response<T>> {
        let Response { headers, data } = self;
        let value = match data {
            Data::Json(v) => v,
            other => {
                return Err(Error::decode(format!(
                    "expected a json response body, got {other:?}"
                )))
            }
        };
        let data = serde_json::from_value(value)
            .map_err(|e| Error::decode("failed to decode response body").with_source(e))?;
        Ok(Response { headers, data })
    }
}
