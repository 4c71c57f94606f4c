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

//! End-to-end envelope tests against a capturing mock transport.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use fc2::{Body, Client, Config, Context, Data, ErrorKind, HttpSend, RequestOptions};
use fc2_core::{RequestBody, Result};
use futures::TryStreamExt;
use http::{HeaderMap, Method, StatusCode};
use pretty_assertions::assert_eq;

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: Bytes,
}

/// Transport that records every request and replays canned responses.
#[derive(Debug, Clone, Default)]
struct MockHttpSend {
    captured: Arc<Mutex<Vec<Captured>>>,
    responses: Arc<Mutex<VecDeque<http::Response<Bytes>>>>,
}

impl MockHttpSend {
    fn push_response(&self, status: StatusCode, content_type: &str, body: &str) {
        let mut resp = http::Response::builder().status(status);
        if !content_type.is_empty() {
            resp = resp.header("content-type", content_type);
        }
        self.responses
            .lock()
            .unwrap()
            .push_back(resp.body(Bytes::from(body.to_string())).unwrap());
    }

    fn push_response_with_headers(
        &self,
        status: StatusCode,
        headers: &[(&str, &str)],
        body: &str,
    ) {
        let mut resp = http::Response::builder().status(status);
        for (name, value) in headers {
            resp = resp.header(*name, *value);
        }
        self.responses
            .lock()
            .unwrap()
            .push_back(resp.body(Bytes::from(body.to_string())).unwrap());
    }

    fn last_captured(&self) -> Captured {
        self.captured.lock().unwrap().last().cloned().unwrap()
    }
}

#[async_trait]
impl HttpSend for MockHttpSend {
    async fn http_send(&self, req: http::Request<RequestBody>) -> Result<http::Response<Bytes>> {
        let (parts, body) = req.into_parts();
        let body = match body {
            RequestBody::Full(bytes) => bytes,
            RequestBody::Streaming(mut stream) => {
                let mut buf = BytesMut::new();
                while let Some(chunk) = stream.try_next().await.unwrap() {
                    buf.extend_from_slice(&chunk);
                }
                buf.freeze()
            }
        };
        self.captured.lock().unwrap().push(Captured {
            method: parts.method,
            uri: parts.uri.to_string(),
            headers: parts.headers,
            body,
        });

        Ok(self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            http::Response::builder()
                .status(StatusCode::OK)
                .header("content-type", "application/json")
                .body(Bytes::from_static(b"{}"))
                .unwrap()
        }))
    }
}

fn client_with_mock() -> (Client, MockHttpSend) {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock = MockHttpSend::default();
    let client = Client::with_context(
        "123456",
        Config {
            access_key_id: Some("akid".to_string()),
            access_key_secret: Some("aksecret".to_string()),
            region: Some("cn-shanghai".to_string()),
            ..Default::default()
        },
        Context::new().with_http_send(mock.clone()),
    )
    .unwrap();
    (client, mock)
}

#[tokio::test]
async fn sends_baseline_headers_and_authorization() {
    let (client, mock) = client_with_mock();

    client.list_services(&Default::default(), None).await.unwrap();

    let captured = mock.last_captured();
    assert_eq!(captured.method, Method::GET);
    assert_eq!(
        captured.uri,
        "http://123456.cn-shanghai.fc.aliyuncs.com/2016-08-15/services"
    );
    assert_eq!(captured.headers.get("accept").unwrap(), "application/json");
    assert_eq!(
        captured.headers.get("host").unwrap(),
        "123456.cn-shanghai.fc.aliyuncs.com"
    );
    assert_eq!(captured.headers.get("x-fc-account-id").unwrap(), "123456");
    assert!(captured
        .headers
        .get("date")
        .unwrap()
        .to_str()
        .unwrap()
        .ends_with("GMT"));
    assert!(captured.headers.contains_key("user-agent"));

    let authorization = captured.headers.get("authorization").unwrap().to_str().unwrap();
    assert!(authorization.starts_with("FC akid:"), "{authorization}");

    // Signing the captured request again must reproduce the header.
    let expected = fc2::get_signature(
        "akid",
        "aksecret",
        &Method::GET,
        "/2016-08-15/services",
        &captured.headers,
        None,
    );
    assert_eq!(authorization, expected);
}

#[tokio::test]
async fn buffered_bodies_carry_content_hash() {
    let (client, mock) = client_with_mock();
    mock.push_response(
        StatusCode::OK,
        "application/json",
        r#"{"serviceName":"demo","serviceId":"sid"}"#,
    );

    let resp = client
        .create_service("demo", &Default::default(), None)
        .await
        .unwrap();
    assert_eq!(resp.data.service_name, "demo");
    assert_eq!(resp.data.service_id, "sid");

    let captured = mock.last_captured();
    assert_eq!(captured.method, Method::POST);
    assert_eq!(
        captured.headers.get("content-type").unwrap(),
        "application/json"
    );
    assert_eq!(
        captured.headers.get("content-length").unwrap().to_str().unwrap(),
        captured.body.len().to_string()
    );
    // content-md5 is base64 over the hex digest string.
    assert_eq!(
        captured.headers.get("content-md5").unwrap().to_str().unwrap(),
        fc2_core::hash::content_md5(&captured.body)
    );

    let body: serde_json::Value = serde_json::from_slice(&captured.body).unwrap();
    assert_eq!(body["serviceName"], "demo");
}

#[tokio::test]
async fn text_invocation_goes_out_as_octet_stream() {
    let (client, mock) = client_with_mock();
    mock.push_response(StatusCode::OK, "text/plain", "pong");

    let resp = client
        .invoke_function("demo", "hello", Some("ping".into()), None, None, Default::default())
        .await
        .unwrap();
    assert_eq!(resp.data, Data::Text("pong".to_string()));

    let captured = mock.last_captured();
    assert_eq!(
        captured.uri,
        "http://123456.cn-shanghai.fc.aliyuncs.com/2016-08-15/services/demo/functions/hello/invocations"
    );
    assert_eq!(
        captured.headers.get("content-type").unwrap(),
        "application/octet-stream"
    );
    assert_eq!(captured.body.as_ref(), b"ping");
}

#[tokio::test]
async fn qualifier_joins_the_service_segment() {
    let (client, mock) = client_with_mock();

    client
        .invoke_function("demo", "hello", Some("ping".into()), None, Some("LATEST"), Default::default())
        .await
        .unwrap();

    let captured = mock.last_captured();
    assert!(
        captured.uri.ends_with("/services/demo.LATEST/functions/hello/invocations"),
        "{}",
        captured.uri
    );
}

#[tokio::test]
async fn structured_invocation_event_is_rejected() {
    let (client, _mock) = client_with_mock();

    let err = client
        .invoke_function(
            "demo",
            "hello",
            Some(Body::Structured(serde_json::json!({"a": 1}))),
            None,
            None,
            Default::default(),
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}

#[tokio::test]
async fn api_errors_are_structured() {
    let (client, mock) = client_with_mock();
    mock.push_response_with_headers(
        StatusCode::FORBIDDEN,
        &[
            ("content-type", "application/json"),
            ("x-fc-request-id", "req-42"),
        ],
        r#"{"ErrorCode":"InvalidAccessKeyId","ErrorMessage":"the key does not exist"}"#,
    );

    let err = client.get_service("demo", None, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.name(), "FCInvalidAccessKeyIdError");
    assert_eq!(err.status(), Some(StatusCode::FORBIDDEN));
    assert_eq!(err.request_id(), Some("req-42"));
    let message = err.to_string();
    assert!(message.contains("403"), "{message}");
    assert!(message.contains("req-42"), "{message}");
    assert!(message.contains("the key does not exist"), "{message}");
}

#[tokio::test]
async fn api_errors_tolerate_lowercase_fields() {
    let (client, mock) = client_with_mock();
    mock.push_response(
        StatusCode::NOT_FOUND,
        "application/json",
        r#"{"errorCode":"ServiceNotFound","errorMessage":"no such service"}"#,
    );

    let err = client.get_service("gone", None, None).await.unwrap_err();
    assert_eq!(err.name(), "FCServiceNotFoundError");
    assert_eq!(err.error_code(), Some("ServiceNotFound"));
}

#[tokio::test]
async fn api_errors_without_code_map_to_unknown() {
    let (client, mock) = client_with_mock();
    mock.push_response(StatusCode::BAD_GATEWAY, "text/plain", "upstream exploded");

    let err = client.get_service("demo", None, None).await.unwrap_err();
    assert_eq!(err.name(), "FCUnknownError");
    assert!(err.to_string().contains("upstream exploded"));
}

#[tokio::test]
async fn unparsable_success_json_is_a_decode_error() {
    let (client, mock) = client_with_mock();
    mock.push_response(StatusCode::OK, "application/json", "{not json");

    let err = client.get_service("demo", None, None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn non_proxy_queries_stay_out_of_the_signature() {
    let (client, mock) = client_with_mock();

    let queries = vec![("limit".to_string(), "10".to_string())];
    client.get("/services", Some(&queries), None).await.unwrap();

    let captured = mock.last_captured();
    assert!(captured.uri.ends_with("/services?limit=10"), "{}", captured.uri);
    let authorization = captured.headers.get("authorization").unwrap().to_str().unwrap();
    let without_queries = fc2::get_signature(
        "akid",
        "aksecret",
        &Method::GET,
        "/2016-08-15/services",
        &captured.headers,
        None,
    );
    let with_queries = fc2::get_signature(
        "akid",
        "aksecret",
        &Method::GET,
        "/2016-08-15/services",
        &captured.headers,
        Some(&queries),
    );
    assert_eq!(authorization, without_queries);
    assert_ne!(authorization, with_queries);
}

#[tokio::test]
async fn proxy_queries_join_the_signature() {
    let (client, mock) = client_with_mock();

    let queries = vec![("foo".to_string(), "bar".to_string())];
    client
        .get("/proxy/demo/hello/", Some(&queries), None)
        .await
        .unwrap();

    let captured = mock.last_captured();
    let authorization = captured.headers.get("authorization").unwrap().to_str().unwrap();
    let with_queries = fc2::get_signature(
        "akid",
        "aksecret",
        &Method::GET,
        "/2016-08-15/proxy/demo/hello/",
        &captured.headers,
        Some(&queries),
    );
    assert_eq!(authorization, with_queries);
}

#[tokio::test]
async fn raw_buf_skips_decoding() {
    let (client, mock) = client_with_mock();
    mock.push_response(StatusCode::OK, "application/json", r#"{"a":1}"#);

    let resp = client
        .request(
            Method::GET,
            "/services/demo",
            None,
            None,
            None,
            RequestOptions { raw_buf: true },
        )
        .await
        .unwrap();
    assert_eq!(resp.data, Data::Binary(Bytes::from_static(br#"{"a":1}"#)));
}

#[tokio::test]
async fn raw_buf_still_decodes_error_documents() {
    let (client, mock) = client_with_mock();
    mock.push_response_with_headers(
        StatusCode::OK,
        &[
            ("content-type", "application/json"),
            ("x-fc-error-type", "UnhandledInvocationError"),
        ],
        r#"{"errorMessage":"boom"}"#,
    );

    let resp = client
        .request(
            Method::GET,
            "/services/demo",
            None,
            None,
            None,
            RequestOptions { raw_buf: true },
        )
        .await
        .unwrap();
    assert_eq!(
        resp.data,
        Data::Json(serde_json::json!({"errorMessage": "boom"}))
    );
}

#[tokio::test]
async fn caller_headers_override_baseline() {
    let (client, mock) = client_with_mock();

    let mut headers = HeaderMap::new();
    headers.insert("x-fc-invocation-type", "Async".parse().unwrap());
    client
        .invoke_function("demo", "hello", Some("e".into()), Some(headers), None, Default::default())
        .await
        .unwrap();

    let captured = mock.last_captured();
    assert_eq!(captured.headers.get("x-fc-invocation-type").unwrap(), "Async");
    // The extra x-fc- header participates in the signature.
    let expected = fc2::get_signature(
        "akid",
        "aksecret",
        &Method::POST,
        "/2016-08-15/services/demo/functions/hello/invocations",
        &captured.headers,
        None,
    );
    assert_eq!(captured.headers.get("authorization").unwrap().to_str().unwrap(), expected);
}

#[tokio::test]
async fn security_token_travels_with_sts_keys() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mock = MockHttpSend::default();
    let client = Client::with_context(
        "123456",
        Config {
            access_key_id: Some("STSakid".to_string()),
            access_key_secret: Some("aksecret".to_string()),
            security_token: Some("token-123".to_string()),
            region: Some("cn-shanghai".to_string()),
            ..Default::default()
        },
        Context::new().with_http_send(mock.clone()),
    )
    .unwrap();

    client.list_services(&Default::default(), None).await.unwrap();
    let captured = mock.last_captured();
    assert_eq!(
        captured.headers.get("x-fc-security-token").unwrap(),
        "token-123"
    );
}

#[tokio::test]
async fn request_id_is_exposed_on_responses() {
    let (client, mock) = client_with_mock();
    mock.push_response_with_headers(
        StatusCode::OK,
        &[
            ("content-type", "application/json"),
            ("x-fc-request-id", "req-7"),
        ],
        "{}",
    );

    let resp = client.get_account_settings(None).await.unwrap();
    assert_eq!(resp.request_id(), Some("req-7"));
}
