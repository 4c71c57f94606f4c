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

//! Service operations.

use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::client::Client;
use crate::resources::{qualify, ListOptions};
use crate::response::Response;
use fc2_core::Result;

/// Log store configuration for a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Log store name.
    pub logstore: String,
    /// Log project name.
    pub project: String,
}

/// VPC access configuration for a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VpcConfig {
    /// VPC id.
    pub vpc_id: String,
    /// VSwitch ids the functions attach to.
    #[serde(rename = "vSwitchIds")]
    pub v_switch_ids: Vec<String>,
    /// Security group id.
    pub security_group_id: String,
}

/// One NAS mount point.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NasMountPoint {
    /// NAS server address.
    pub server_addr: String,
    /// Local mount directory.
    pub mount_dir: String,
}

/// NAS file system configuration for a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NasConfig {
    /// Uid the mount uses.
    pub user_id: String,
    /// Gid the mount uses.
    pub group_id: String,
    /// Mount points.
    pub mount_points: Vec<NasMountPoint>,
}

/// Options for creating or updating a service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOptions {
    /// Service description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// RAM role the service assumes for log shipping and VPC access.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Whether functions may access the internet.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub internet_access: Option<bool>,
    /// Log store configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_config: Option<LogConfig>,
    /// VPC configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_config: Option<VpcConfig>,
    /// NAS configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nas_config: Option<NasConfig>,
}

/// A service as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Service {
    /// Service name.
    pub service_name: String,
    /// Service id assigned by the platform.
    pub service_id: String,
    /// Service description.
    pub description: Option<String>,
    /// RAM role.
    pub role: Option<String>,
    /// Whether functions may access the internet.
    pub internet_access: Option<bool>,
    /// Log store configuration.
    pub log_config: Option<LogConfig>,
    /// VPC configuration.
    pub vpc_config: Option<VpcConfig>,
    /// NAS configuration.
    pub nas_config: Option<NasConfig>,
    /// Creation time.
    pub created_time: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<String>,
}

/// One page of services.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServiceList {
    /// The services on this page.
    pub services: Vec<Service>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

impl Client {
    /// Create a service.
    pub async fn create_service(
        &self,
        service_name: &str,
        options: &ServiceOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Service>> {
        let mut body = serde_json::to_value(options)
            .map_err(|e| fc2_core::Error::request_invalid("invalid service options").with_source(e))?;
        body["serviceName"] = serde_json::Value::String(service_name.to_string());
        self.post("/services", Body::Structured(body), headers, None, Default::default())
            .await?
            .decode_into()
    }

    /// List services, one page at a time.
    pub async fn list_services(
        &self,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<ServiceList>> {
        self.get("/services", Some(&options.to_queries()), headers)
            .await?
            .decode_into()
    }

    /// Get a service, optionally pinned to a version or alias.
    pub async fn get_service(
        &self,
        service_name: &str,
        qualifier: Option<&str>,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Service>> {
        let path = format!("/services/{}", qualify(service_name, qualifier));
        self.get(&path, None, headers).await?.decode_into()
    }

    /// Update a service.
    pub async fn update_service(
        &self,
        service_name: &str,
        options: &ServiceOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<Service>> {
        let path = format!("/services/{service_name}");
        self.put(&path, Body::structured(options)?, headers)
            .await?
            .decode_into()
    }

    /// Delete a service.
    pub async fn delete_service(
        &self,
        service_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/services/{service_name}");
        self.delete(&path, None, headers).await
    }
}
