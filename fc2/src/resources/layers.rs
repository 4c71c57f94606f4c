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

//! Layer operations.
//!
//! Layers are returned as decoded JSON rather than typed models; their shape
//! varies noticeably across runtime generations.

use http::HeaderMap;
use serde_json::Value;

use crate::body::Body;
use crate::client::Client;
use crate::resources::ListOptions;
use crate::response::Response;
use fc2_core::Result;

impl Client {
    /// List layers, one page at a time.
    pub async fn list_layers(
        &self,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        self.get("/layers", Some(&options.to_queries()), headers)
            .await
    }

    /// List the versions of a layer, one page at a time.
    pub async fn list_layer_versions(
        &self,
        layer_name: &str,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/layers/{layer_name}/versions");
        self.get(&path, Some(&options.to_queries()), headers).await
    }

    /// Get one version of a layer.
    pub async fn get_layer_version(
        &self,
        layer_name: &str,
        version: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/layers/{layer_name}/versions/{version}");
        self.get(&path, None, headers).await
    }

    /// Publish a new version of a layer.
    pub async fn publish_layer_version(
        &self,
        layer_name: &str,
        options: &Value,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/layers/{layer_name}/versions");
        self.post(&path, Body::Structured(options.clone()), headers, None, Default::default())
            .await
    }

    /// Delete one version of a layer.
    pub async fn delete_layer_version(
        &self,
        layer_name: &str,
        version: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/layers/{layer_name}/versions/{version}");
        self.delete(&path, None, headers).await
    }
}
