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

//! Function operations, including invocation.

use std::collections::HashMap;

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::body::Body;
use crate::client::{Client, RequestOptions};
use crate::resources::{qualify, ListOptions};
use crate::response::Response;
use fc2_core::{Error, Result};

/// Where the function code comes from: an inline zip or an OSS object.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionCode {
    /// Base64 zip payload, uploaded inline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_file: Option<String>,
    /// OSS bucket holding the code object.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oss_bucket_name: Option<String>,
    /// OSS object key of the code archive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oss_object_name: Option<String>,
}

/// Options for creating or updating a function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionOptions {
    /// Function name. Ignored on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_name: Option<String>,
    /// Code location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<FunctionCode>,
    /// Entry point, e.g. `index.handler`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub handler: Option<String>,
    /// Runtime name, e.g. `nodejs14`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
    /// Initializer entry point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initializer: Option<String>,
    /// Function description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Memory size in MB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<i64>,
    /// Invocation timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<i64>,
    /// Initializer timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialization_timeout: Option<i64>,
    /// Requests served concurrently by one instance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_concurrency: Option<i64>,
    /// Environment variables. Note the capitalized wire name.
    #[serde(
        rename = "EnvironmentVariables",
        skip_serializing_if = "Option::is_none"
    )]
    pub environment_variables: Option<HashMap<String, String>>,
}

/// A function as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Function {
    /// Function name.
    pub function_name: String,
    /// Function id assigned by the platform.
    pub function_id: String,
    /// Entry point.
    pub handler: Option<String>,
    /// Runtime name.
    pub runtime: Option<String>,
    /// Initializer entry point.
    pub initializer: Option<String>,
    /// Function description.
    pub description: Option<String>,
    /// Memory size in MB.
    pub memory_size: Option<i64>,
    /// Invocation timeout in seconds.
    pub timeout: Option<i64>,
    /// Initializer timeout in seconds.
    pub initialization_timeout: Option<i64>,
    /// Requests served concurrently by one instance.
    pub instance_concurrency: Option<i64>,
    /// Checksum of the deployed code.
    pub code_checksum: Option<String>,
    /// Size of the deployed code in bytes.
    pub code_size: Option<i64>,
    /// Environment variables.
    #[serde(rename = "EnvironmentVariables")]
    pub environment_variables: Option<HashMap<String, String>>,
    /// Creation time.
    pub created_time: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<String>,
}

/// One page of functions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionList {
    /// The functions on this page.
    pub functions: Vec<Function>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

/// Download location of a function's deployed code.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionCodeLocation {
    /// Signed download url.
    pub url: Option<String>,
    /// Code checksum.
    pub checksum: Option<String>,
}

/// Per-invocation behavior flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct InvokeOptions {
    /// Return the invocation result as raw bytes instead of decoding it.
    pub raw_buf: bool,
}

/// Coerce loosely typed function parameters into their wire types.
///
/// Accepts payloads where numeric fields arrive as strings (and vice versa),
/// as deployment tooling commonly produces: name-like fields become strings,
/// the size/timeout fields become integers. Fields that are absent or not
/// coercible are left untouched.
pub fn normalize_function_params(options: &mut Value) {
    const STRING_FIELDS: [&str; 4] = ["functionName", "runtime", "handler", "initializer"];
    const INT_FIELDS: [&str; 4] = [
        "memorySize",
        "timeout",
        "initializationTimeout",
        "instanceConcurrency",
    ];

    let Some(map) = options.as_object_mut() else {
        return;
    };
    for field in STRING_FIELDS {
        if let Some(v) = map.get_mut(field) {
            if let Some(n) = v.as_number().cloned() {
                *v = Value::String(n.to_string());
            }
        }
    }
    for field in INT_FIELDS {
        if let Some(v) = map.get_mut(field) {
            if let Some(n) = v.as_str().and_then(|s| s.parse::<i64>().ok()) {
                *v = Value::Number(n.into());
            }
        }
    }
}

impl Client {
    /// Create a function inside a service.
    pub async fn create_function(
        &self,
        service_name: &str,
        options: &FunctionOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Function>> {
        let mut body = serde_json::to_value(options)
            .map_err(|e| Error::request_invalid("invalid function options").with_source(e))?;
        normalize_function_params(&mut body);
        let path = format!("/services/{service_name}/functions");
        self.post(&path, Body::Structured(body), headers, None, Default::default())
            .await?
            .decode_into()
    }

    /// List the functions of a service, one page at a time.
    pub async fn list_functions(
        &self,
        service_name: &str,
        options: &ListOptions,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response<FunctionList>> {
        let path = format!("/services/{}/functions", qualify(service_name, qualifier));
        self.get(&path, Some(&options.to_queries()), headers)
            .await?
            .decode_into()
    }

    /// Get a function.
    pub async fn get_function(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Function>> {
        let path = format!(
            "/services/{}/functions/{function_name}",
            qualify(service_name, qualifier)
        );
        self.get(&path, None, headers).await?.decode_into()
    }

    /// Get the download location of a function's deployed code.
    pub async fn get_function_code(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response<FunctionCodeLocation>> {
        let path = format!(
            "/services/{}/functions/{function_name}/code",
            qualify(service_name, qualifier)
        );
        self.get(&path, None, headers).await?.decode_into()
    }

    /// Update a function.
    pub async fn update_function(
        &self,
        service_name: &str,
        function_name: &str,
        options: &FunctionOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Function>> {
        let mut body = serde_json::to_value(options)
            .map_err(|e| Error::request_invalid("invalid function options").with_source(e))?;
        normalize_function_params(&mut body);
        let path = format!("/services/{service_name}/functions/{function_name}");
        self.put(&path, Body::Structured(body), headers)
            .await?
            .decode_into()
    }

    /// Delete a function.
    pub async fn delete_function(
        &self,
        service_name: &str,
        function_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/services/{service_name}/functions/{function_name}");
        self.delete(&path, None, headers).await
    }

    /// Invoke a function.
    ///
    /// The event must be text or binary; use [`Body::Text`] or
    /// [`Body::Binary`] (structured and streaming payloads are rejected, the
    /// platform passes the event through opaquely). Invocation results are
    /// decoded like any other response unless `opts.raw_buf` is set.
    pub async fn invoke_function(
        &self,
        service_name: &str,
        function_name: &str,
        event: Option<Body>,
        headers: Option<HeaderMap>,
        qualifier: Option<&str>,
        opts: InvokeOptions,
    ) -> Result<Response> {
        if let Some(Body::Structured(_) | Body::Stream(_)) = event {
            return Err(Error::request_invalid("event must be text or binary"));
        }
        let path = format!(
            "/services/{}/functions/{function_name}/invocations",
            qualify(service_name, qualifier)
        );
        self.request(
            http::Method::POST,
            &path,
            None,
            event,
            headers,
            RequestOptions {
                raw_buf: opts.raw_buf,
            },
        )
        .await
    }
}
