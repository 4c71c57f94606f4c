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

//! Thin per-operation wrappers over the request envelope.
//!
//! Each operation fills in a url template and an options payload, then goes
//! through [`Client::request`](crate::Client::request). Responses for the
//! strongly modelled resources (services, functions, triggers, domains,
//! versions, aliases, tags, provision configs) decode into typed structs;
//! the remaining surfaces return the decoded [`Data`](crate::Data) as-is.

use serde::{Deserialize, Serialize};

mod account;
mod aliases;
mod domains;
mod functions;
mod instances;
mod layers;
mod provision;
mod services;
mod tags;
mod triggers;
mod versions;

pub use aliases::{Alias, AliasList, AliasOptions};
pub use domains::{
    CertConfig, CustomDomain, CustomDomainList, CustomDomainOptions, PathConfig, RouteConfig,
};
pub use functions::{
    normalize_function_params, Function, FunctionCode, FunctionCodeLocation, FunctionList,
    FunctionOptions, InvokeOptions,
};
pub use provision::{ProvisionConfig, ProvisionConfigList, ProvisionTarget};
pub use services::{
    LogConfig, NasConfig, NasMountPoint, Service, ServiceList, ServiceOptions, VpcConfig,
};
pub use tags::TagsInfo;
pub use triggers::{Trigger, TriggerList, TriggerOptions};
pub use versions::{Version, VersionList};

/// Append a version/alias qualifier to a resource name: `name.qualifier`.
pub(crate) fn qualify(name: &str, qualifier: Option<&str>) -> String {
    match qualifier {
        Some(q) if !q.is_empty() => format!("{name}.{q}"),
        _ => name.to_string(),
    }
}

/// Pagination options shared by the list operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOptions {
    /// Page size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<i64>,
    /// Only list resources whose name starts with this prefix.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Only list resources whose name sorts after this key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_key: Option<String>,
    /// Continuation token from a previous page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

impl ListOptions {
    pub(crate) fn to_queries(&self) -> Vec<(String, String)> {
        let mut queries = Vec::new();
        if let Some(limit) = self.limit {
            queries.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(prefix) = &self.prefix {
            queries.push(("prefix".to_string(), prefix.clone()));
        }
        if let Some(start_key) = &self.start_key {
            queries.push(("startKey".to_string(), start_key.clone()));
        }
        if let Some(next_token) = &self.next_token {
            queries.push(("nextToken".to_string(), next_token.clone()));
        }
        queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_qualify() {
        assert_eq!(qualify("svc", None), "svc");
        assert_eq!(qualify("svc", Some("")), "svc");
        assert_eq!(qualify("svc", Some("LATEST")), "svc.LATEST");
    }

    #[test]
    fn test_list_options_queries() {
        let opts = ListOptions {
            limit: Some(20),
            prefix: Some("demo".to_string()),
            ..Default::default()
        };
        assert_eq!(
            opts.to_queries(),
            vec![
                ("limit".to_string(), "20".to_string()),
                ("prefix".to_string(), "demo".to_string()),
            ]
        );
    }
}
