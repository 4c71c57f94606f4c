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

//! Custom domain operations.

use http::HeaderMap;
use serde::{Deserialize, Serialize};

use crate::body::Body;
use crate::client::Client;
use crate::resources::ListOptions;
use crate::response::Response;
use fc2_core::Result;

/// One route from a path pattern to a function.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathConfig {
    /// Path pattern, e.g. `/api/*`.
    pub path: String,
    /// Target service.
    pub service_name: String,
    /// Target function.
    pub function_name: String,
}

/// Routing table of a custom domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    /// The routes, matched in order.
    pub routes: Vec<PathConfig>,
}

/// TLS certificate bound to a custom domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertConfig {
    /// Certificate name.
    pub cert_name: String,
    /// PEM private key.
    pub private_key: String,
    /// PEM certificate chain.
    pub certificate: String,
}

/// Options for creating or updating a custom domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomDomainOptions {
    /// Protocols served: `HTTP` or `HTTP,HTTPS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
    /// Routing table.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_config: Option<RouteConfig>,
    /// TLS certificate, required for `HTTP,HTTPS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cert_config: Option<CertConfig>,
}

/// A custom domain as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomDomain {
    /// The domain name.
    pub domain_name: String,
    /// Protocols served.
    pub protocol: Option<String>,
    /// API version the domain is bound to.
    pub api_version: Option<String>,
    /// Routing table.
    pub route_config: Option<RouteConfig>,
    /// TLS certificate.
    pub cert_config: Option<CertConfig>,
    /// Creation time.
    pub created_time: Option<String>,
    /// Last modification time.
    pub last_modified_time: Option<String>,
}

/// One page of custom domains.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomDomainList {
    /// The domains on this page.
    pub custom_domains: Vec<CustomDomain>,
    /// Continuation token for the next page.
    pub next_token: Option<String>,
}

impl Client {
    /// Bind a custom domain.
    pub async fn create_custom_domain(
        &self,
        domain_name: &str,
        options: &CustomDomainOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<CustomDomain>> {
        let mut body = serde_json::to_value(options)
            .map_err(|e| fc2_core::Error::request_invalid("invalid domain options").with_source(e))?;
        body["domainName"] = serde_json::Value::String(domain_name.to_string());
        self.post("/custom-domains", Body::Structured(body), headers, None, Default::default())
            .await?
            .decode_into()
    }

    /// List custom domains, one page at a time.
    pub async fn list_custom_domains(
        &self,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<CustomDomainList>> {
        self.get("/custom-domains", Some(&options.to_queries()), headers)
            .await?
            .decode_into()
    }

    /// Get a custom domain.
    pub async fn get_custom_domain(
        &self,
        domain_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response<CustomDomain>> {
        let path = format!("/custom-domains/{domain_name}");
        self.get(&path, None, headers).await?.decode_into()
    }

    /// Update a custom domain.
    pub async fn update_custom_domain(
        &self,
        domain_name: &str,
        options: &CustomDomainOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response<CustomDomain>> {
        let path = format!("/custom-domains/{domain_name}");
        self.put(&path, Body::structured(options)?, headers)
            .await?
            .decode_into()
    }

    /// Unbind a custom domain.
    pub async fn delete_custom_domain(
        &self,
        domain_name: &str,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!("/custom-domains/{domain_name}");
        self.delete(&path, None, headers).await
    }
}
