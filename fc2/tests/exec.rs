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

//! Exec session tests against a scripted mock socket.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use fc2::{Client, Config, Context, ExecEvent, ExecOptions, SocketChannel, SocketConnect, SocketEvent};
use fc2_core::Result;
use pretty_assertions::assert_eq;

#[derive(Debug, Clone, Default)]
struct ChannelState {
    sent: Arc<Mutex<Vec<Bytes>>>,
    pings: Arc<Mutex<usize>>,
    closed: Arc<Mutex<bool>>,
}

/// Channel that replays scripted inbound events and records outbound ones.
#[derive(Debug)]
struct MockChannel {
    inbound: VecDeque<SocketEvent>,
    // Once the script runs out, block forever instead of reporting a close.
    hang_when_drained: bool,
    state: ChannelState,
}

#[async_trait]
impl SocketChannel for MockChannel {
    async fn send(&mut self, data: Bytes) -> Result<()> {
        self.state.sent.lock().unwrap().push(data);
        Ok(())
    }

    async fn ping(&mut self, _data: Bytes) -> Result<()> {
        *self.state.pings.lock().unwrap() += 1;
        Ok(())
    }

    async fn next_event(&mut self) -> Result<Option<SocketEvent>> {
        match self.inbound.pop_front() {
            Some(event) => Ok(Some(event)),
            None if self.hang_when_drained => std::future::pending().await,
            None => Ok(None),
        }
    }

    async fn close(&mut self) -> Result<()> {
        *self.state.closed.lock().unwrap() = true;
        Ok(())
    }
}

#[derive(Debug)]
struct MockSocketConnect {
    channel: Mutex<Option<MockChannel>>,
    upgrade_uri: Arc<Mutex<Option<String>>>,
    authorized: Arc<Mutex<bool>>,
}

impl MockSocketConnect {
    fn new(channel: MockChannel) -> Self {
        Self {
            channel: Mutex::new(Some(channel)),
            upgrade_uri: Arc::new(Mutex::new(None)),
            authorized: Arc::new(Mutex::new(false)),
        }
    }
}

#[async_trait]
impl SocketConnect for MockSocketConnect {
    async fn socket_connect(&self, req: http::Request<()>) -> Result<Box<dyn SocketChannel>> {
        *self.upgrade_uri.lock().unwrap() = Some(req.uri().to_string());
        *self.authorized.lock().unwrap() = req.headers().contains_key("authorization");
        let channel = self.channel.lock().unwrap().take().unwrap();
        Ok(Box::new(channel))
    }
}

fn exec_client(channel: MockChannel) -> (Client, Arc<Mutex<Option<String>>>, Arc<Mutex<bool>>) {
    let connect = MockSocketConnect::new(channel);
    let uri = connect.upgrade_uri.clone();
    let authorized = connect.authorized.clone();
    let client = Client::with_context(
        "123456",
        Config {
            access_key_id: Some("akid".to_string()),
            access_key_secret: Some("aksecret".to_string()),
            region: Some("cn-shanghai".to_string()),
            ..Default::default()
        },
        Context::new().with_socket_connect(connect),
    )
    .unwrap();
    (client, uri, authorized)
}

fn options() -> ExecOptions {
    ExecOptions {
        command: vec!["/bin/sh".to_string()],
        stdin: true,
        stdout: true,
        stderr: true,
        tty: false,
        idle_timeout: None,
    }
}

#[tokio::test]
async fn output_frames_are_demultiplexed() {
    let state = ChannelState::default();
    let channel = MockChannel {
        inbound: VecDeque::from([
            SocketEvent::Message(Bytes::from_static(&[1, b'o', b'u', b't'])),
            SocketEvent::Message(Bytes::from_static(&[2, b'e', b'r', b'r'])),
            SocketEvent::Closed {
                code: Some(1000),
                reason: "done".to_string(),
            },
        ]),
        hang_when_drained: false,
        state: state.clone(),
    };
    let (client, uri, authorized) = exec_client(channel);

    let mut conn = client
        .instance_exec("demo", "hello", None, "instance-1", &options())
        .await
        .unwrap();

    let uri = uri.lock().unwrap().clone().unwrap();
    assert!(uri.starts_with(
        "ws://123456.cn-shanghai.fc.aliyuncs.com/2016-08-15/services/demo/functions/hello/instances/instance-1/exec?"
    ), "{uri}");
    assert!(uri.contains("command=%2Fbin%2Fsh"), "{uri}");
    assert!(*authorized.lock().unwrap());

    match conn.next_event().await.unwrap() {
        ExecEvent::Stdout(data) => assert_eq!(data.as_ref(), b"out"),
        other => panic!("expected stdout, got {other:?}"),
    }
    match conn.next_event().await.unwrap() {
        ExecEvent::Stderr(data) => assert_eq!(data.as_ref(), b"err"),
        other => panic!("expected stderr, got {other:?}"),
    }
    match conn.next_event().await.unwrap() {
        ExecEvent::Closed { code, reason } => {
            assert_eq!(code, Some(1000));
            assert_eq!(reason, "done");
        }
        other => panic!("expected close, got {other:?}"),
    }
    assert!(conn.next_event().await.is_none());
}

#[tokio::test]
async fn stdin_is_framed_on_channel_zero() {
    let state = ChannelState::default();
    let channel = MockChannel {
        inbound: VecDeque::new(),
        hang_when_drained: true,
        state: state.clone(),
    };
    let (client, _uri, _authorized) = exec_client(channel);

    let mut conn = client
        .instance_exec("demo", "hello", Some("prod"), "instance-1", &options())
        .await
        .unwrap();

    conn.send_stdin(b"ls\n").await.unwrap();
    conn.close().await;

    match conn.next_event().await.unwrap() {
        ExecEvent::Closed { code, reason } => {
            assert_eq!(code, None);
            assert_eq!(reason, "closed by client");
        }
        other => panic!("expected close, got {other:?}"),
    }

    let sent = state.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].as_ref(), &[0, b'l', b's', b'\n']);
    assert!(*state.closed.lock().unwrap());
}

#[tokio::test(start_paused = true)]
async fn missing_pong_tears_the_session_down() {
    let state = ChannelState::default();
    let channel = MockChannel {
        inbound: VecDeque::new(),
        hang_when_drained: true,
        state: state.clone(),
    };
    let (client, _uri, _authorized) = exec_client(channel);

    let mut conn = client
        .instance_exec("demo", "hello", None, "instance-1", &options())
        .await
        .unwrap();

    // First keepalive tick pings; the second finds no pong and gives up.
    match conn.next_event().await.unwrap() {
        ExecEvent::Error(err) => assert!(err.to_string().contains("pong"), "{err}"),
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(*state.pings.lock().unwrap(), 1);
    assert!(*state.closed.lock().unwrap());
}

#[tokio::test(start_paused = true)]
async fn pong_keeps_the_session_alive() {
    let state = ChannelState::default();
    let channel = MockChannel {
        inbound: VecDeque::from([
            SocketEvent::Pong(Bytes::new()),
            SocketEvent::Pong(Bytes::new()),
            SocketEvent::Closed {
                code: None,
                reason: "idle".to_string(),
            },
        ]),
        hang_when_drained: true,
        state: state.clone(),
    };
    let (client, _uri, _authorized) = exec_client(channel);

    let mut conn = client
        .instance_exec("demo", "hello", None, "instance-1", &options())
        .await
        .unwrap();

    match conn.next_event().await.unwrap() {
        ExecEvent::Closed { reason, .. } => assert_eq!(reason, "idle"),
        other => panic!("expected close, got {other:?}"),
    }
}
