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

//! Config for the Function Compute client.

use std::collections::HashMap;
use std::time::Duration;

use crate::constants::DEFAULT_TIMEOUT;

/// Config carries everything needed to talk to a Function Compute account.
///
/// Only the credentials and the region (or an explicit endpoint) are
/// required; everything else has a sensible default.
///
/// ```no_run
/// use fc2::Config;
///
/// let config = Config {
///     access_key_id: Some("ak-id".to_string()),
///     access_key_secret: Some("ak-secret".to_string()),
///     region: Some("cn-shanghai".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Access key id for the account (or an STS key, see `security_token`).
    pub access_key_id: Option<String>,
    /// Access key secret used to sign every request.
    pub access_key_secret: Option<String>,
    /// STS security token. Required when `access_key_id` starts with `STS`.
    pub security_token: Option<String>,
    /// Region the account's functions live in, e.g. `cn-shanghai`.
    pub region: Option<String>,
    /// Explicit endpoint. When set it wins over the derived
    /// `{account}.{region}.fc.aliyuncs.com` one.
    pub endpoint: Option<String>,
    /// Use https for the derived endpoint. Defaults to false.
    pub secure: bool,
    /// Use the intranet endpoint (`{region}-internal`). Defaults to false.
    pub internal: bool,
    /// Per-request timeout. Defaults to 60 seconds.
    pub timeout: Duration,
    /// Extra headers merged into every request.
    pub headers: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            access_key_id: None,
            access_key_secret: None,
            security_token: None,
            region: None,
            endpoint: None,
            secure: false,
            internal: false,
            timeout: DEFAULT_TIMEOUT,
            headers: HashMap::new(),
        }
    }
}
