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

//! Provisioned, on-demand and async invocation configuration.
//!
//! Provision configs get typed models; the async and on-demand surfaces are
//! passed through as decoded JSON, mirroring how loosely the service itself
//! specifies them.

use http::HeaderMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::body::Body;
use crate::client::Client;
use crate::resources::{qualify, ListOptions};
use crate::response::Response;
use fc2_core::Result;

/// Target for a provision config update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionTarget {
    /// Number of instances to keep provisioned.
    pub target: i64,
}

/// A provision config as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionConfig {
    /// Fully qualified resource the config applies to.
    pub resource: String,
    /// Requested number of provisioned instances.
    pub target: i64,
    /// Number of instances currently provisioned.
    pub current: Option<i64>,
}

/// One page of provision configs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProvisionConfigList {
    /// The configs on this page.
    pub provision_configs: Vec<ProvisionConfig>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

impl Client {
    /// List provision configs across the account, one page at a time.
    pub async fn list_provision_configs(
        &self,
        service_name: Option<&str>,
        qualifier: Option<&str>,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<ProvisionConfigList>> {
        let mut queries = options.to_queries();
        if let Some(service_name) = service_name {
            queries.push(("serviceName".to_string(), service_name.to_string()));
        }
        if let Some(qualifier) = qualifier {
            queries.push(("qualifier".to_string(), qualifier.to_string()));
        }
        self.get("/provision-configs", Some(&queries), headers)
            .await?
            .decode_into()
    }

    /// Get the provision config of a function.
    pub async fn get_provision_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response<ProvisionConfig>> {
        let path = format!(
            "/services/{}/functions/{function_name}/provision-config",
            qualify(service_name, qualifier)
        );
        self.get(&path, None, headers).await?.decode_into()
    }

    /// Set the provision target of a function.
    pub async fn put_provision_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        target: &ProvisionTarget,
        headers: Option<HeaderMap>,
    ) -> Result<Response<ProvisionConfig>> {
        let path = format!(
            "/services/{}/functions/{function_name}/provision-config",
            qualify(service_name, qualifier)
        );
        self.put(&path, Body::structured(target)?, headers)
            .await?
            .decode_into()
    }

    /// Get the async invocation config of a function.
    pub async fn get_function_async_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{}/functions/{function_name}/async-invoke-config",
            qualify(service_name, qualifier)
        );
        self.get(&path, None, headers).await
    }

    /// Set the async invocation config of a function.
    pub async fn put_function_async_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        options: &Value,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{}/functions/{function_name}/async-invoke-config",
            qualify(service_name, qualifier)
        );
        self.put(&path, Body::Structured(options.clone()), headers)
            .await
    }

    /// Delete the async invocation config of a function.
    pub async fn delete_function_async_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{}/functions/{function_name}/async-invoke-config",
            qualify(service_name, qualifier)
        );
        self.delete(&path, None, headers).await
    }

    /// List the async invocation configs of a function, one page at a time.
    pub async fn list_function_async_configs(
        &self,
        service_name: &str,
        function_name: &str,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path =
            format!("/services/{service_name}/functions/{function_name}/async-invoke-configs");
        self.get(&path, Some(&options.to_queries()), headers).await
    }

    /// List on-demand configs across the account, one page at a time.
    pub async fn list_on_demand_configs(
        &self,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        self.get("/on-demand-configs", Some(&options.to_queries()), headers)
            .await
    }

    /// Get the on-demand config of a function.
    pub async fn get_on_demand_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{}/functions/{function_name}/on-demand-config",
            qualify(service_name, qualifier)
        );
        self.get(&path, None, headers).await
    }

    /// Cap the concurrent on-demand instances of a function.
    pub async fn put_on_demand_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        maximum_instance_count: i64,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{}/functions/{function_name}/on-demand-config",
            qualify(service_name, qualifier)
        );
        let body = json!({ "maximumInstanceCount": maximum_instance_count });
        self.put(&path, Body::Structured(body), headers).await
    }

    /// Delete the on-demand config of a function.
    pub async fn delete_on_demand_config(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{}/functions/{function_name}/on-demand-config",
            qualify(service_name, qualifier)
        );
        self.delete(&path, None, headers).await
    }
}
