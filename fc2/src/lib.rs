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

//! Client for the Function Compute management API.
//!
//! Every request is signed: the method, content hash, content type, date,
//! the platform's own `x-fc-*` headers and the percent-decoded path are
//! folded into an HMAC-SHA256 signature carried in the `authorization`
//! header. This crate implements that protocol plus the full management
//! surface on top of it: services, functions (including invocation),
//! triggers, custom domains, versions, aliases, tags, provisioned and
//! on-demand capacity, layers, and interactive exec sessions on running
//! instances.
//!
//! # Examples
//!
//! ```no_run
//! use fc2::{Client, Config};
//!
//! # async fn example() -> fc2::Result<()> {
//! let client = Client::new(
//!     "account-id",
//!     Config {
//!         access_key_id: Some("ak-id".to_string()),
//!         access_key_secret: Some("ak-secret".to_string()),
//!         region: Some("cn-shanghai".to_string()),
//!         ..Default::default()
//!     },
//! )?;
//!
//! let resp = client
//!     .invoke_function("demo", "hello", Some("ping".into()), None, None, Default::default())
//!     .await?;
//! println!("{:?}", resp.data);
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod body;
mod client;
mod config;
mod constants;
mod exec;
mod resources;
mod response;
mod sign;

pub use body::Body;
pub use client::{Client, RequestOptions};
pub use config::Config;
pub use exec::{ExecConnection, ExecEvent, ExecOptions};
pub use resources::*;
pub use response::{Data, Response};
pub use sign::get_signature;

pub use fc2_core::{
    Context, Error, ErrorKind, HttpSend, Result, SocketChannel, SocketConnect, SocketEvent,
};
