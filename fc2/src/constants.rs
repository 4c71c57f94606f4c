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

//! Protocol constants shared across the crate.

/// The management API version every request is issued against. It is the
/// first path segment of every request url.
pub const API_VERSION: &str = "2016-08-15";

/// Prefix selecting the platform headers that participate in the signature.
///
/// The trailing dash is deliberate: a header like `x-fcdummy` must not be
/// signed, only the platform's own `x-fc-*` namespace is.
pub const SIGNING_HEADER_PREFIX: &str = "x-fc-";

/// Requests under this path namespace have their query string forwarded to
/// user code, so the query parameters are covered by the signature.
pub const PROXY_PATH_PREFIX: &str = "/proxy/";

/// Access key ids with this prefix are temporary STS credentials and must be
/// accompanied by a security token.
pub const STS_KEY_PREFIX: &str = "STS";

/// Domain the per-account endpoints live under.
pub const ENDPOINT_DOMAIN: &str = "fc.aliyuncs.com";

/// Header carrying the account id of the caller.
pub const HEADER_ACCOUNT_ID: &str = "x-fc-account-id";
/// Header carrying the STS security token, when one is configured.
pub const HEADER_SECURITY_TOKEN: &str = "x-fc-security-token";
/// Header carrying the request-tracing id on every response.
pub const HEADER_REQUEST_ID: &str = "x-fc-request-id";
/// Header present on responses whose body is an error document produced by
/// user code rather than by the platform.
pub const HEADER_ERROR_TYPE: &str = "x-fc-error-type";

/// Default request timeout, applied when the config does not set one.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);
