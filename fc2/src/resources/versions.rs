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

//! Version operations.

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::body::Body;
use crate::client::Client;
use crate::resources::ListOptions;
use crate::response::Response;
use fc2_core::Result;

/// A published service version.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Version {
    /// Version id, a monotonically increasing decimal string.
    pub version_id: String,
    /// Description recorded at publish time.
    pub description: Option<String>,
    /// Creation time.
    pub created_time: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<String>,
}

/// One page of versions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VersionList {
    /// The versions on this page.
    pub versions: Vec<Version>,
    /// Listing direction reported by the service.
    pub direction: Option<String>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

impl Client {
    /// Publish the current state of a service as a new immutable version.
    pub async fn publish_version(
        &self,
        service_name: &str,
        description: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Version>> {
        let body = match description {
            Some(description) => json!({ "description": description }),
            None => json!({}),
        };
        let path = format!("/services/{service_name}/versions");
        self.post(&path, Body::Structured(body), headers, None, Default::default())
            .await?
            .decode_into()
    }

    /// List the versions of a service, one page at a time.
    pub async fn list_versions(
        &self,
        service_name: &str,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<VersionList>> {
        let path = format!("/services/{service_name}/versions");
        self.get(&path, Some(&options.to_queries()), headers)
            .await?
            .decode_into()
    }

    /// Delete a version.
    pub async fn delete_version(
        &self,
        service_name: &str,
        version_id: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/services/{service_name}/versions/{version_id}");
        self.delete(&path, None, headers).await
    }
}
