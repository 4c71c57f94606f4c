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

//! Interactive exec sessions on running function instances.
//!
//! An exec session is a signed socket upgrade carrying the command and the
//! stream flags in its query string. On the wire every message is prefixed
//! with a one-byte channel id: stdin goes out on channel 0, the instance
//! sends stdout on 1 and stderr on 2. A background task pumps the socket,
//! answers keepalive traffic and forwards demultiplexed output through an
//! event queue.

use bytes::{BufMut, Bytes, BytesMut};
use fc2_core::{Error, Result, SocketChannel, SocketEvent};
use log::{debug, warn};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::client::Client;
use crate::resources::qualify;

const CHANNEL_STDIN: u8 = 0;
const CHANNEL_STDOUT: u8 = 1;
const CHANNEL_STDERR: u8 = 2;

const KEEPALIVE_INTERVAL: Duration = Duration::from_secs(15);

// Bounded so a stalled consumer applies backpressure to the socket pump
// instead of buffering output without limit.
const EVENT_QUEUE_DEPTH: usize = 64;

/// Options for opening an exec session.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    /// The command and its arguments.
    pub command: Vec<String>,
    /// Forward stdin to the command.
    pub stdin: bool,
    /// Receive the command's stdout.
    pub stdout: bool,
    /// Receive the command's stderr.
    pub stderr: bool,
    /// Allocate a pseudo terminal.
    pub tty: bool,
    /// Close the session after this many seconds without traffic.
    pub idle_timeout: Option<u32>,
}

impl ExecOptions {
    fn to_queries(&self) -> Vec<(String, String)> {
        let mut queries = Vec::with_capacity(self.command.len() + 5);
        for part in &self.command {
            queries.push(("command".to_string(), part.clone()));
        }
        queries.push(("stdin".to_string(), self.stdin.to_string()));
        queries.push(("stdout".to_string(), self.stdout.to_string()));
        queries.push(("stderr".to_string(), self.stderr.to_string()));
        queries.push(("tty".to_string(), self.tty.to_string()));
        if let Some(idle_timeout) = self.idle_timeout {
            queries.push(("idleTimeout".to_string(), idle_timeout.to_string()));
        }
        queries
    }
}

/// An event observed on an exec session.
#[derive(Debug)]
pub enum ExecEvent {
    /// Output from the command's stdout.
    Stdout(Bytes),
    /// Output from the command's stderr.
    Stderr(Bytes),
    /// The session failed; no further events follow.
    Error(Error),
    /// The session ended; no further events follow.
    Closed {
        /// Close code, when the peer supplied one.
        code: Option<u16>,
        /// Close reason, possibly empty.
        reason: String,
    },
}

enum ExecCommand {
    Stdin(Bytes),
    Close,
}

/// An open exec session.
///
/// Dropping the connection aborts the pump task and tears the socket down.
#[derive(Debug)]
pub struct ExecConnection {
    commands: mpsc::Sender<ExecCommand>,
    events: mpsc::Receiver<ExecEvent>,
    pump: JoinHandle<()>,
}

impl ExecConnection {
    pub(crate) fn new(channel: Box<dyn SocketChannel>) -> Self {
        let (commands, commands_rx) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let (events_tx, events) = mpsc::channel(EVENT_QUEUE_DEPTH);
        let pump = tokio::spawn(pump(channel, commands_rx, events_tx));
        Self {
            commands,
            events,
            pump,
        }
    }

    /// Send bytes to the command's stdin.
    pub async fn send_stdin(&self, data: &[u8]) -> Result<()> {
        let mut frame = BytesMut::with_capacity(data.len() + 1);
        frame.put_u8(CHANNEL_STDIN);
        frame.put_slice(data);
        self.commands
            .send(ExecCommand::Stdin(frame.freeze()))
            .await
            .map_err(|_| Error::unexpected("exec session is closed"))
    }

    /// Receive the next event. Returns `None` once the session has ended
    /// and all events have been drained.
    pub async fn next_event(&mut self) -> Option<ExecEvent> {
        self.events.recv().await
    }

    /// Close the session.
    pub async fn close(&self) {
        // An already finished pump means there is nothing left to close.
        let _ = self.commands.send(ExecCommand::Close).await;
    }
}

impl Drop for ExecConnection {
    fn drop(&mut self) {
        self.pump.abort();
    }
}

async fn pump(
    mut channel: Box<dyn SocketChannel>,
    mut commands: mpsc::Receiver<ExecCommand>,
    events: mpsc::Sender<ExecEvent>,
) {
    let mut keepalive = interval_at(Instant::now() + KEEPALIVE_INTERVAL, KEEPALIVE_INTERVAL);
    keepalive.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut awaiting_pong = false;

    loop {
        tokio::select! {
            cmd = commands.recv() => match cmd {
                Some(ExecCommand::Stdin(frame)) => {
                    if let Err(e) = channel.send(frame).await {
                        let _ = events.send(ExecEvent::Error(e)).await;
                        break;
                    }
                }
                Some(ExecCommand::Close) | None => {
                    let _ = channel.close().await;
                    let _ = events
                        .send(ExecEvent::Closed { code: None, reason: "closed by client".to_string() })
                        .await;
                    break;
                }
            },
            _ = keepalive.tick() => {
                if awaiting_pong {
                    let _ = channel.close().await;
                    let _ = events
                        .send(ExecEvent::Error(Error::unexpected("keepalive pong not received")))
                        .await;
                    break;
                }
                if let Err(e) = channel.ping(Bytes::new()).await {
                    let _ = events.send(ExecEvent::Error(e)).await;
                    break;
                }
                awaiting_pong = true;
            },
            event = channel.next_event() => match event {
                Ok(Some(SocketEvent::Message(data))) => {
                    let forwarded = match data.split_first() {
                        Some((&CHANNEL_STDOUT, payload)) => {
                            events.send(ExecEvent::Stdout(Bytes::copy_from_slice(payload))).await
                        }
                        Some((&CHANNEL_STDERR, payload)) => {
                            events.send(ExecEvent::Stderr(Bytes::copy_from_slice(payload))).await
                        }
                        Some((channel_id, _)) => {
                            warn!("dropping frame on unknown exec channel {channel_id}");
                            Ok(())
                        }
                        None => Ok(()),
                    };
                    if forwarded.is_err() {
                        // Consumer dropped the connection.
                        let _ = channel.close().await;
                        break;
                    }
                }
                Ok(Some(SocketEvent::Pong(_))) => awaiting_pong = false,
                Ok(Some(SocketEvent::Ping(data))) => {
                    debug!("exec ping: {} bytes", data.len());
                }
                Ok(Some(SocketEvent::Closed { code, reason })) => {
                    let _ = events.send(ExecEvent::Closed { code, reason }).await;
                    break;
                }
                Ok(None) => {
                    let _ = events
                        .send(ExecEvent::Closed { code: None, reason: String::new() })
                        .await;
                    break;
                }
                Err(e) => {
                    let _ = events.send(ExecEvent::Error(e)).await;
                    break;
                }
            },
        }
    }
}

impl Client {
    /// Open an interactive exec session on a running instance.
    ///
    /// Requires a socket transport on the client's context; the default
    /// context has none and this returns an error there.
    pub async fn instance_exec(
        &self,
        service_name: &str,
        function_name: &str,
        qualifier: Option<&str>,
        instance_id: &str,
        options: &ExecOptions,
    ) -> Result<ExecConnection> {
        let path = format!(
            "/services/{}/functions/{function_name}/instances/{instance_id}/exec",
            qualify(service_name, qualifier)
        );
        let channel = self.open_socket(&path, &options.to_queries()).await?;
        Ok(ExecConnection::new(channel))
    }
}
