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

//! Request signing for the Function Compute API.
//!
//! Every request carries `authorization: FC {accessKeyId}:{signature}` where
//! the signature is a base64 HMAC-SHA256 over a canonical string built from
//! the method, the content hash, the content type, the date, the sorted
//! `x-fc-*` headers and the percent-decoded path. For paths under the proxy
//! namespace the query parameters are part of the signed string as well,
//! since an upstream gateway may rewrite them in transit.

use std::fmt::Write;

use fc2_core::hash::base64_hmac_sha256;
use http::header::{CONTENT_TYPE, DATE};
use http::{HeaderMap, Method};
use log::debug;
use percent_encoding::percent_decode_str;

use crate::constants::SIGNING_HEADER_PREFIX;

const CONTENT_MD5: &str = "content-md5";

/// Build the canonical header block: every header whose name starts with the
/// given prefix, sorted by name, rendered as `name:value\n`.
///
/// Header names are matched case-insensitively (`HeaderMap` keeps them
/// lowercase). When a name was inserted more than once the last value wins.
/// Values are signed byte for byte, padding included.
pub fn build_canonical_headers(headers: &HeaderMap, prefix: &str) -> String {
    let mut signed: Vec<(&str, String)> = headers
        .keys()
        .filter(|name| name.as_str().starts_with(prefix))
        .map(|name| {
            // keys() yields each name once; take the last value for it.
            let value = headers
                .get_all(name)
                .iter()
                .last()
                .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
                .unwrap_or_default();
            (name.as_str(), value)
        })
        .collect();
    signed.sort();

    let mut block = String::with_capacity(signed.len() * 16);
    for (name, value) in signed {
        block.push_str(name);
        block.push(':');
        block.push_str(&value);
        block.push('\n');
    }
    block
}

/// Compose the string-to-sign for a request.
///
/// `path` is the full versioned path and may carry an embedded query string,
/// which is split off before percent-decoding. `queries` must be `Some` only
/// when the query parameters are covered by the signature (proxy paths and
/// socket upgrades); pass the flattened pairs in any order, they are sorted
/// here as whole `key=value` strings.
///
/// The `date` header is expected to be present; the envelope always sets it.
pub fn compose_string_to_sign(
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    queries: Option<&[(String, String)]>,
) -> String {
    let content_md5 = header_str(headers, CONTENT_MD5);
    let content_type = headers
        .get(CONTENT_TYPE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    let date = headers
        .get(DATE)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default();
    let canonical_headers = build_canonical_headers(headers, SIGNING_HEADER_PREFIX);

    // Only the path component is decoded, never the embedded query string.
    let raw_path = path.split('?').next().unwrap_or(path);
    let decoded_path = percent_decode_str(raw_path).decode_utf8_lossy();

    let mut s = String::new();
    // Writing to a String never fails.
    let _ = write!(
        s,
        "{method}\n{content_md5}\n{content_type}\n{date}\n{canonical_headers}{decoded_path}"
    );

    if let Some(queries) = queries {
        let mut pairs: Vec<String> = queries.iter().map(|(k, v)| format!("{k}={v}")).collect();
        pairs.sort();
        s.push('\n');
        s.push_str(&pairs.join("\n"));
    }

    s
}

/// HMAC-SHA256 the string-to-sign with the access key secret, base64 encoded.
pub fn sign_string(string_to_sign: &str, access_key_secret: &str) -> String {
    base64_hmac_sha256(access_key_secret.as_bytes(), string_to_sign.as_bytes())
}

/// Compute the full `authorization` header value for a request.
///
/// This is a pure function: callers can use it to verify signatures or to
/// sign requests sent through their own transport.
pub fn get_signature(
    access_key_id: &str,
    access_key_secret: &str,
    method: &Method,
    path: &str,
    headers: &HeaderMap,
    queries: Option<&[(String, String)]>,
) -> String {
    let string_to_sign = compose_string_to_sign(method, path, headers, queries);
    debug!("string to sign: {string_to_sign}");
    format!(
        "FC {access_key_id}:{}",
        sign_string(&string_to_sign, access_key_secret)
    )
}

fn header_str(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header::{HeaderName, HeaderValue};
    use pretty_assertions::assert_eq;

    fn headers_from(pairs: &[(&str, &str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.insert(
                name.parse::<HeaderName>().unwrap(),
                value.parse::<HeaderValue>().unwrap(),
            );
        }
        headers
    }

    #[test]
    fn test_canonical_headers_sorted() {
        let headers = headers_from(&[("x-fc-foo", "123"), ("x-fc-bar", "xyz")]);
        assert_eq!(
            build_canonical_headers(&headers, "x-fc-"),
            "x-fc-bar:xyz\nx-fc-foo:123\n"
        );
    }

    #[test]
    fn test_canonical_headers_insertion_order_invariant() {
        let a = headers_from(&[("x-fc-foo", "123"), ("x-fc-bar", "xyz")]);
        let b = headers_from(&[("x-fc-bar", "xyz"), ("x-fc-foo", "123")]);
        assert_eq!(
            build_canonical_headers(&a, "x-fc-"),
            build_canonical_headers(&b, "x-fc-")
        );
    }

    #[test]
    fn test_canonical_headers_prefix_filtering() {
        // Exactly the prefix is in; `x-fcdummy` and unrelated names are out.
        // Mixed-case names match because header names are lowercased.
        let headers = headers_from(&[
            ("x-fc-", "boundary"),
            ("X-FC-UPPER", "up"),
            ("x-fcdummy", "dummy"),
            ("test", "foo"),
        ]);
        assert_eq!(
            build_canonical_headers(&headers, "x-fc-"),
            "x-fc-:boundary\nx-fc-upper:up\n"
        );
    }

    #[test]
    fn test_canonical_headers_preserve_value_padding() {
        // Values are signed as-is; padding must survive into the block.
        let padded = headers_from(&[("x-fc-foo", " 123 ")]);
        assert_eq!(
            build_canonical_headers(&padded, "x-fc-"),
            "x-fc-foo: 123 \n"
        );

        let bare = headers_from(&[("x-fc-foo", "123")]);
        assert_ne!(
            get_signature("akid", "secret", &Method::GET, "/services", &padded, None),
            get_signature("akid", "secret", &Method::GET, "/services", &bare, None),
        );
    }

    #[test]
    fn test_canonical_headers_empty() {
        let headers = headers_from(&[("content-type", "text/json")]);
        assert_eq!(build_canonical_headers(&headers, "x-fc-"), "");
    }

    #[test]
    fn test_compose_string_to_sign_full() {
        let headers = headers_from(&[
            ("content-md5", "1bca714f406993b309bb87fabeb30a6b"),
            ("content-type", "text/json"),
            ("date", "today"),
            ("x-fc-foo", "123"),
            ("x-fc-bar", "xyz"),
            ("x-fcdummy", "dummy"),
            ("test", "foo"),
        ]);
        let queries = vec![
            ("foo".to_string(), "bar".to_string()),
            ("key1".to_string(), "xyz".to_string()),
            ("key1".to_string(), "abc".to_string()),
            (
                "key3 with-escaped~chars_here.ext".to_string(),
                "value with-escaped~chars_here.ext".to_string(),
            ),
            ("key2".to_string(), "123".to_string()),
        ];

        let actual = compose_string_to_sign(
            &Method::GET,
            "/path/action with-escaped~chars_here.ext",
            &headers,
            Some(&queries),
        );
        assert_eq!(
            actual,
            "GET\n1bca714f406993b309bb87fabeb30a6b\ntext/json\ntoday\nx-fc-bar:xyz\nx-fc-foo:123\n/path/action with-escaped~chars_here.ext\nfoo=bar\nkey1=abc\nkey1=xyz\nkey2=123\nkey3 with-escaped~chars_here.ext=value with-escaped~chars_here.ext"
        );
    }

    #[test]
    fn test_compose_percent_decodes_path_only() {
        let headers = headers_from(&[("date", "today")]);
        let actual = compose_string_to_sign(
            &Method::GET,
            "/proxy/a%20b/c%7Ed?escaped=%20not%20decoded",
            &headers,
            None,
        );
        assert_eq!(actual, "GET\n\n\ntoday\n/proxy/a b/c~d");
    }

    #[test]
    fn test_compose_without_queries_has_no_trailing_block() {
        let headers = headers_from(&[("date", "today")]);
        let actual = compose_string_to_sign(&Method::GET, "/services", &headers, None);
        assert_eq!(actual, "GET\n\n\ntoday\n/services");
    }

    #[test]
    fn test_compose_with_empty_queries_appends_newline() {
        // A supplied-but-empty mapping still marks the request as
        // query-signed, matching the wire protocol for proxy paths.
        let headers = headers_from(&[("date", "today")]);
        let actual = compose_string_to_sign(&Method::GET, "/proxy/svc/fn/", &headers, Some(&[]));
        assert_eq!(actual, "GET\n\n\ntoday\n/proxy/svc/fn/\n");
    }

    #[test]
    fn test_get_signature_format_and_stability() {
        let headers = headers_from(&[("date", "today"), ("x-fc-account-id", "123")]);
        let a = get_signature("akid", "secret", &Method::GET, "/services", &headers, None);
        let b = get_signature("akid", "secret", &Method::GET, "/services", &headers, None);
        assert_eq!(a, b);
        assert!(a.starts_with("FC akid:"));
        assert!(a.len() > "FC akid:".len());

        // Any change to the signed material changes the signature.
        let c = get_signature("akid", "secret", &Method::GET, "/service", &headers, None);
        assert_ne!(a, c);
    }
}
