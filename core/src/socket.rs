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

use crate::{Error, Result};
use bytes::Bytes;
use std::fmt::Debug;

/// An event observed on an open duplex channel.
///
/// Events are delivered in the order the underlying socket produced them;
/// there is no reordering between message and control frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// A binary message frame.
    Message(Bytes),
    /// A ping control frame from the peer.
    Ping(Bytes),
    /// A pong control frame answering one of our pings.
    Pong(Bytes),
    /// The peer closed the channel.
    Closed {
        /// Close code, when the peer supplied one.
        code: Option<u16>,
        /// Close reason, possibly empty.
        reason: String,
    },
}

/// An open duplex channel.
///
/// `next_event` returns `Ok(None)` once the channel is exhausted after a
/// close.
#[async_trait::async_trait]
pub trait SocketChannel: Send {
    /// Send a binary message frame.
    async fn send(&mut self, data: Bytes) -> Result<()>;

    /// Send a ping control frame.
    async fn ping(&mut self, data: Bytes) -> Result<()>;

    /// Wait for the next inbound event.
    async fn next_event(&mut self) -> Result<Option<SocketEvent>>;

    /// Close the channel.
    async fn close(&mut self) -> Result<()>;
}

/// SocketConnect opens a duplex channel against a signed upgrade request.
///
/// The request carries the full url (including the signed query string) and
/// the authorization headers; implementations perform the protocol upgrade.
#[async_trait::async_trait]
pub trait SocketConnect: Debug + Send + Sync + 'static {
    /// Open a channel for the given request.
    async fn socket_connect(&self, req: http::Request<()>) -> Result<Box<dyn SocketChannel>>;
}

/// NoopSocketConnect is a no-op implementation that always returns an error.
///
/// This is used when no socket transport is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSocketConnect;

#[async_trait::async_trait]
impl SocketConnect for NoopSocketConnect {
    async fn socket_connect(&self, _req: http::Request<()>) -> Result<Box<dyn SocketChannel>> {
        Err(Error::unexpected(
            "socket connect not supported: no socket transport configured",
        ))
    }
}
