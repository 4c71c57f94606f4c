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

//! Hash related utils.

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use md5::Md5;
use sha2::Digest;
use sha2::Sha256;

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Hex encoded MD5 digest.
pub fn hex_md5(content: &[u8]) -> String {
    hex::encode(Md5::digest(content).as_slice())
}

/// Content hash in the form the Function Compute API expects for
/// `content-md5`: the hex MD5 digest, base64 encoded as an ASCII string.
///
/// Note this is NOT base64 over the raw digest bytes.
pub fn content_md5(content: &[u8]) -> String {
    base64_encode(hex_md5(content).as_bytes())
}

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// Base64 encoded HMAC with SHA256 hash.
pub fn base64_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256>::new_from_slice(key).unwrap();
    h.update(content);

    base64_encode(&h.finalize().into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_md5() {
        assert_eq!(hex_md5(b"hello"), "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_content_md5() {
        // base64 of the hex digest string, the wire form of content-md5.
        assert_eq!(
            content_md5(b"hello"),
            "NWQ0MTQwMmFiYzRiMmE3NmI5NzE5ZDkxMTAxN2M1OTI="
        );
    }

    #[test]
    fn test_base64_hmac_sha256_is_deterministic() {
        let a = base64_hmac_sha256(b"secret", b"payload");
        let b = base64_hmac_sha256(b"secret", b"payload");
        assert_eq!(a, b);
        assert_ne!(a, base64_hmac_sha256(b"secret", b"payloae"));
    }
}
