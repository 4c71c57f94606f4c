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

//! Account level operations.

use http::HeaderMap;

use crate::client::Client;
use crate::resources::ListOptions;
use crate::response::Response;
use fc2_core::Result;

impl Client {
    /// Get the account settings.
    pub async fn get_account_settings(&self, headers: Option<HeaderMap>) -> Result<Response> {
        self.get("/account-settings", None, headers).await
    }

    /// List purchased reserved capacities, one page at a time.
    pub async fn list_reserved_capacities(
        &self,
        options: &ListOptions,
        headers: Option<HeaderMap>,
    ) -> Result<Response> {
        self.get("/reservedCapacities", Some(&options.to_queries()), headers)
            .await
    }
}
