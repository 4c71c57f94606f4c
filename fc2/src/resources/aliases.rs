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

//! Alias operations.

use std::collections::HashMap;

use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::client::Client;
use crate::resources::ListOptions;
use crate::response::Response;
use fc2_core::{Error, Result};

/// Optional fields for creating or updating an alias.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasOptions {
    /// Alias description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Canary weights: extra versions receiving a fraction of the traffic.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_version_weight: Option<HashMap<String, f64>>,
}

/// An alias as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Alias {
    /// Alias name.
    pub alias_name: String,
    /// Version the alias points at.
    pub version_id: String,
    /// Alias description.
    pub description: Option<String>,
    /// Canary weights.
    pub additional_version_weight: Option<HashMap<String, f64>>,
    /// Creation time.
    pub created_time: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<String>,
}

/// One page of aliases.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AliasList {
    /// The aliases on this page.
    pub aliases: Vec<Alias>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

impl Client {
    /// Create an alias pointing at a version.
    pub async fn create_alias(
        &self,
        service_name: &str,
        alias_name: &str,
        version_id: &str,
        options: &AliasOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Alias>> {
        let mut body = serde_json::to_value(options)
            .map_err(|e| Error::request_invalid("invalid alias options").with_source(e))?;
        body["aliasName"] = serde_json::Value::String(alias_name.to_string());
        body["versionId"] = serde_json::Value::String(version_id.to_string());
        let path = format!("/services/{service_name}/aliases");
        self.post(&path, Body::Structured(body), headers, None, Default::default())
            .await?
            .decode_into()
    }

    /// List the aliases of a service, one page at a time.
    pub async fn list_aliases(
        &self,
        service_name: &str,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<AliasList>> {
        let path = format!("/services/{service_name}/aliases");
        self.get(&path, Some(&options.to_queries()), headers)
            .await?
            .decode_into()
    }

    /// Get an alias.
    pub async fn get_alias(
        &self,
        service_name: &str,
        alias_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Alias>> {
        let path = format!("/services/{service_name}/aliases/{alias_name}");
        self.get(&path, None, headers).await?.decode_into()
    }

    /// Update an alias; `version_id` retargets it when supplied.
    pub async fn update_alias(
        &self,
        service_name: &str,
        alias_name: &str,
        version_id: Option<&str>,
        options: &AliasOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Alias>> {
        let mut body = serde_json::to_value(options)
            .map_err(|e| Error::request_invalid("invalid alias options").with_source(e))?;
        if let Some(version_id) = version_id {
            body["versionId"] = serde_json::Value::String(version_id.to_string());
        }
        let path = format!("/services/{service_name}/aliases/{alias_name}");
        self.put(&path, Body::Structured(body), headers)
            .await?
            .decode_into()
    }

    /// Delete an alias.
    pub async fn delete_alias(
        &self,
        service_name: &str,
        alias_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/services/{service_name}/aliases/{alias_name}");
        self.delete(&path, None, headers).await
    }
}
