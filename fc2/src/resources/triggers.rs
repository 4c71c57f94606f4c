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

//! Trigger operations.

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::body::Body;
use crate::client::Client;
use crate::resources::ListOptions;
use crate::response::Response;
use fc2_core::Result;

/// Options for creating or updating a trigger.
///
/// `trigger_config` is source-specific and passed through as-is; its shape
/// depends on `trigger_type` (oss, log, timer, http, ...).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerOptions {
    /// Trigger name. Ignored on update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_name: Option<String>,
    /// Trigger type, e.g. `oss` or `timer`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<String>,
    /// Source-specific configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_config: Option<Value>,
    /// RAM role assumed by the event source to invoke the function.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invocation_role: Option<String>,
    /// ARN of the event source.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_arn: Option<String>,
    /// Version or alias the trigger pins its invocations to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

/// A trigger as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Trigger {
    /// Trigger name.
    pub trigger_name: String,
    /// Trigger type.
    pub trigger_type: Option<String>,
    /// Source-specific configuration.
    pub trigger_config: Option<Value>,
    /// RAM role assumed by the event source.
    pub invocation_role: Option<String>,
    /// ARN of the event source.
    pub source_arn: Option<String>,
    /// Version or alias the trigger pins its invocations to.
    pub qualifier: Option<String>,
    /// Creation time.
    pub created_time: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<String>,
}

/// One page of triggers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TriggerList {
    /// The triggers on this page.
    pub triggers: Vec<Trigger>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

impl Client {
    /// Create a trigger on a function.
    pub async fn create_trigger(
        &self,
        service_name: &str,
        function_name: &str,
        options: &TriggerOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Trigger>> {
        let path = format!("/services/{service_name}/functions/{function_name}/triggers");
        self.post(&path, Body::structured(options)?, headers, None, Default::default())
            .await?
            .decode_into()
    }

    /// List the triggers of a function, one page at a time.
    pub async fn list_triggers(
        &self,
        service_name: &str,
        function_name: &str,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<TriggerList>> {
        let path = format!("/services/{service_name}/functions/{function_name}/triggers");
        self.get(&path, Some(&options.to_queries()), headers)
            .await?
            .decode_into()
    }

    /// Get a trigger.
    pub async fn get_trigger(
        &self,
        service_name: &str,
        function_name: &str,
        trigger_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Trigger>> {
        let path = format!(
            "/services/{service_name}/functions/{function_name}/triggers/{trigger_name}"
        );
        self.get(&path, None, headers).await?.decode_into()
    }

    /// Update a trigger.
    pub async fn update_trigger(
        &self,
        service_name: &str,
        function_name: &str,
        trigger_name: &str,
        options: &TriggerOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Trigger>> {
        let path = format!(
            "/services/{service_name}/functions/{function_name}/triggers/{trigger_name}"
        );
        self.put(&path, Body::structured(options)?, headers)
            .await?
            .decode_into()
    }

    /// Delete a trigger.
    pub async fn delete_trigger(
        &self,
        service_name: &str,
        function_name: &str,
        trigger_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{service_name}/functions/{function_name}/triggers/{trigger_name}"
        );
        self.delete(&path, None, headers).await
    }
}
