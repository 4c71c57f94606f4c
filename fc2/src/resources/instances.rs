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

//! Running instance listing.

use http::HeaderMap;

use crate::client::Client;
use crate::resources::{qualify, ListOptions};
use crate::response::Response;
use fc2_core::Result;

impl Client {
    /// List the running instances of a function.
    pub async fn list_instances(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        let path = format!(
            "/services/{}/functions/{function_name}/instances",
            qualify(service_name, qualifier)
        );
        self.get(&path, Some(&options.to_queries()), headers).await
    }
}
