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

//! Core components for the fc2 client.
//!
//! This crate provides the foundational types shared by the fc2 ecosystem:
//! the error taxonomy, hashing and time helpers, and the transport
//! collaborator traits the client dispatches through.
//!
//! ## Overview
//!
//! - **Context**: a container holding the HTTP and socket transport
//!   implementations
//! - **Traits**: [`HttpSend`] for one-shot request dispatch and
//!   [`SocketConnect`] for opening duplex channels
//! - **Utilities**: [`hash`] for the MD5/HMAC primitives the signing
//!   protocol needs, [`time`] for HTTP dates
//!
//! Transports are collaborators: this crate ships only no-op defaults, and
//! concrete implementations (e.g. `fc2-http-send-reqwest`) live in their own
//! crates.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;

mod error;
pub use error::{Error, ErrorKind, Result};

mod body;
pub use body::{RequestBody, RequestTimeout};

mod context;
pub use context::Context;
mod http;
pub use http::{HttpSend, NoopHttpSend};
mod socket;
pub use socket::{NoopSocketConnect, SocketChannel, SocketConnect, SocketEvent};
