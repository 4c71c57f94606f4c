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

//! Resource tagging operations.

use std::collections::HashMap;

use http::{HeaderMap, Method};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::body::Body;
use crate::client::Client;
use crate::response::Response;
use fc2_core::Result;

/// Tags attached to a resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TagsInfo {
    /// ARN of the tagged resource.
    pub resource_arn: String,
    /// The tags.
    pub tags: HashMap<String, String>,
}

impl Client {
    /// Attach tags to a resource; existing keys are overwritten.
    pub async fn tag_resource(
        &self,
        resource_arn: &str,
        tags: &HashMap<String, String>,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let body = json!({ "resourceArn": resource_arn, "tags": tags });
        self.post("/tag", Body::Structured(body), headers, None, Default::default())
            .await
    }

    /// Remove tags from a resource. With `all` set, every tag is removed and
    /// `tag_keys` may be empty.
    pub async fn untag_resource(
        &self,
        resource_arn: &str,
        tag_keys: &[String],
        all: bool,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        // The untag operation is a DELETE that carries a body.
        let body = json!({ "resourceArn": resource_arn, "tagKeys": tag_keys, "all": all });
        self.request(
            Method::DELETE,
            "/tag",
            None,
            Some(Body::Structured(body)),
            headers,
            Default::default(),
        )
        .await
    }

    /// List the tags of a resource.
    pub async fn get_resource_tags(
        &self,
        resource_arn: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response<TagsInfo>> {
        let queries = vec![("resourceArn".to_string(), resource_arn.to_string())];
        self.get("/tag", Some(&queries), headers).await?.decode_into()
    }
}
