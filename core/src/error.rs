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

use http::StatusCode;
use std::fmt;
use thiserror::Error;

/// The error type for fc2 operations.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
    status: Option<StatusCode>,
    request_id: Option<String>,
    error_code: Option<String>,
}

/// The kind of error that occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Client configuration is incomplete or invalid (missing access key,
    /// region, etc.). Raised at construction, before any request is made.
    ConfigInvalid,

    /// A request cannot be built from the given arguments (invalid header
    /// value, unsupported payload type, malformed url).
    RequestInvalid,

    /// The remote API completed the round trip and returned a non-2xx
    /// status. Carries the status, the request-tracing id, and the remote
    /// error code when the response body provided one.
    Api,

    /// A success response carried a body that could not be decoded
    /// (e.g. `application/json` content that fails to parse).
    Decode,

    /// Unexpected errors (transport failures, I/O, etc.).
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
            status: None,
            request_id: None,
            error_code: None,
        }
    }

    /// Add a source error.
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach the HTTP status of the failed response.
    pub fn with_status(mut self, status: StatusCode) -> Self {
        self.status = Some(status);
        self
    }

    /// Attach the request-tracing id reported by the remote service.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Attach the remote error code from the response body.
    pub fn with_error_code(mut self, code: impl Into<String>) -> Self {
        self.error_code = Some(code.into());
        self
    }

    /// Get the error kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// HTTP status of the failed round trip, if this is an API error.
    pub fn status(&self) -> Option<StatusCode> {
        self.status
    }

    /// The `x-fc-request-id` reported by the service, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// The remote error code (e.g. `InvalidAccessKeyId`), if any.
    pub fn error_code(&self) -> Option<&str> {
        self.error_code.as_deref()
    }

    /// The error discriminator in the form the service's SDKs use:
    /// `FC{remoteErrorCode}Error`. An API error without a code in its body
    /// maps to `FCUnknownError`.
    pub fn name(&self) -> String {
        match self.kind {
            ErrorKind::Api => format!("FC{}Error", self.error_code.as_deref().unwrap_or("Unknown")),
            kind => kind.to_string(),
        }
    }
}

// Convenience constructors
impl Error {
    /// Create a config invalid error.
    pub fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    /// Create a request invalid error.
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an API error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Api, message)
    }

    /// Create a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Decode, message)
    }

    /// Create an unexpected error.
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ConfigInvalid => write!(f, "invalid configuration"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Api => write!(f, "api error"),
            ErrorKind::Decode => write!(f, "decode error"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderName> for Error {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Self::decode(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
