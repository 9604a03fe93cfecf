//! AWS Signature Version 4 for admin API requests.
//!
//! Admin requests carry no body and no query string, so only the pieces a
//! signed `GET` needs are implemented here.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const SERVICE: &str = "s3";
const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-content-sha256;x-amz-date";

/// Headers to attach to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub content_sha256: String,
    pub authorization: String,
}

/// Credentials and scope used for signing.
#[derive(Debug, Clone)]
pub struct Signer<'a> {
    pub access_key: &'a str,
    pub secret_key: &'a str,
    pub region: &'a str,
}

impl Signer<'_> {
    /// Sign a request with an empty payload.
    ///
    /// `host` must match the `Host` header actually sent (including a
    /// non-default port); `path` is the absolute request path.
    pub fn sign(&self, method: &str, host: &str, path: &str, at: DateTime<Utc>) -> SignedHeaders {
        let amz_date = at.format("%Y%m%dT%H%M%SZ").to_string();
        let date = at.format("%Y%m%d").to_string();
        let payload_hash = sha256_hex(b"");

        let canonical_headers =
            format!("host:{host}\nx-amz-content-sha256:{payload_hash}\nx-amz-date:{amz_date}\n");
        let canonical_request = canonical_request(
            method,
            path,
            "",
            &canonical_headers,
            SIGNED_HEADERS,
            &payload_hash,
        );
        let scope = format!("{date}/{}/{SERVICE}/aws4_request", self.region);
        let to_sign = string_to_sign(&canonical_request, &amz_date, &scope);
        let key = signing_key(self.secret_key, &date, self.region, SERVICE);
        let signature = hex::encode(hmac_sha256(&key, to_sign.as_bytes()));

        SignedHeaders {
            authorization: format!(
                "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
                self.access_key
            ),
            amz_date,
            content_sha256: payload_hash,
        }
    }
}

pub fn signing_key(secret_key: &str, date: &str, region: &str, service: &str) -> Vec<u8> {
    let date_key = hmac_sha256(format!("AWS4{secret_key}").as_bytes(), date.as_bytes());
    let region_key = hmac_sha256(&date_key, region.as_bytes());
    let service_key = hmac_sha256(&region_key, service.as_bytes());
    hmac_sha256(&service_key, b"aws4_request")
}

fn canonical_request(
    method: &str,
    uri: &str,
    query_string: &str,
    canonical_headers: &str,
    signed_headers: &str,
    payload_hash: &str,
) -> String {
    format!(
        "{method}\n{uri}\n{query_string}\n{canonical_headers}\n{signed_headers}\n{payload_hash}"
    )
}

fn string_to_sign(canonical_request: &str, date_time: &str, scope: &str) -> String {
    let canonical_hash = sha256_hex(canonical_request.as_bytes());
    format!("{ALGORITHM}\n{date_time}\n{scope}\n{canonical_hash}")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    #[test]
    fn empty_payload_hash() {
        assert_eq!(sha256_hex(b""), EMPTY_SHA256);
    }

    #[test]
    fn signing_key_matches_published_example() {
        // Key derivation example from the AWS SigV4 documentation.
        let key = signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        );
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn signed_headers_layout() {
        let signer = Signer {
            access_key: "AKIDEXAMPLE",
            secret_key: "secret",
            region: DEFAULT_REGION,
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap();
        let h = signer.sign("GET", "minio.local:9000", "/minio/admin/v3/pools/list", at);

        assert_eq!(h.amz_date, "20240501T090307Z");
        assert_eq!(h.content_sha256, EMPTY_SHA256);
        let prefix = "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240501/us-east-1/s3/aws4_request, \
                      SignedHeaders=host;x-amz-content-sha256;x-amz-date, Signature=";
        assert!(h.authorization.starts_with(prefix), "{}", h.authorization);
        assert_eq!(
            &h.authorization[prefix.len()..],
            "478a45b59bec33859b0ebeeb00ad061cf8828c19ee94998fdbbe6021d737667d"
        );
    }

    #[test]
    fn signature_matches_independent_computation() {
        let signer = Signer {
            access_key: "AK",
            secret_key: "SK",
            region: DEFAULT_REGION,
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap();
        let h = signer.sign("GET", "h:9000", "/minio/admin/v3/pools/list", at);
        assert_eq!(
            h.authorization,
            "AWS4-HMAC-SHA256 Credential=AK/20240501/us-east-1/s3/aws4_request, \
             SignedHeaders=host;x-amz-content-sha256;x-amz-date, \
             Signature=6ce8ae7cc4f042fed3d65117634f944396376dbc4c8ceb6fdc4ec400e4580cc0"
        );
    }

    #[test]
    fn empty_secret_still_signs() {
        let signer = Signer {
            access_key: "AK",
            secret_key: "",
            region: DEFAULT_REGION,
        };
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap();
        let auth = signer.sign("GET", "h:9000", "/p", at).authorization;
        let sig = auth.rsplit("Signature=").next().unwrap();
        assert_eq!(sig.len(), 64);
    }

    #[test]
    fn signature_depends_on_host_path_and_secret() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 9, 3, 7).unwrap();
        let a = Signer {
            access_key: "ak",
            secret_key: "one",
            region: DEFAULT_REGION,
        };
        let b = Signer {
            secret_key: "two",
            ..a.clone()
        };
        let base = a.sign("GET", "h:9000", "/p", at);
        assert_eq!(base, a.sign("GET", "h:9000", "/p", at));
        assert_ne!(base.authorization, b.sign("GET", "h:9000", "/p", at).authorization);
        assert_ne!(base.authorization, a.sign("GET", "h:9001", "/p", at).authorization);
        assert_ne!(base.authorization, a.sign("GET", "h:9000", "/q", at).authorization);
    }
}
