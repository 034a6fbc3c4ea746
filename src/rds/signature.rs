use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha1::Sha1;
use thiserror::Error;

// RFC 3986 unreserved characters stay literal; the RPC signature requires
// space as %20 and `*` as %2A, which form encoding gets wrong.
const RPC_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error, Clone)]
#[error("{message}")]
pub struct SignatureError {
    message: String,
}

pub(super) fn percent_encode_component(value: &str) -> String {
    utf8_percent_encode(value, RPC_ENCODE_SET).to_string()
}

/// Percent-encode both halves of every pair, sort by key, join `k=v` with `&`.
pub(super) fn canonicalized_query(params: &[(String, String)]) -> String {
    let mut encoded = params
        .iter()
        .map(|(key, value)| {
            (
                percent_encode_component(key),
                percent_encode_component(value),
            )
        })
        .collect::<Vec<_>>();
    encoded.sort();

    encoded
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("&")
}

/// HMAC-SHA1 over `METHOD&%2F&<encoded-canonical-query>`, keyed with the
/// access key secret plus a trailing `&`, base64-encoded.
pub(super) fn sign_request(
    method: &str,
    params: &[(String, String)],
    access_key_secret: &str,
) -> Result<String, SignatureError> {
    let string_to_sign = format!(
        "{}&{}&{}",
        method,
        percent_encode_component("/"),
        percent_encode_component(&canonicalized_query(params))
    );

    let mut mac = Hmac::<Sha1>::new_from_slice(format!("{}&", access_key_secret).as_bytes())
        .map_err(|error| SignatureError {
            message: format!("signing key rejected: {}", error),
        })?;
    mac.update(string_to_sign.as_bytes());

    Ok(BASE64.encode(mac.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::{canonicalized_query, percent_encode_component, sign_request};

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn encoding_follows_rfc3986_rules() {
        assert_eq!(percent_encode_component("a b"), "a%20b");
        assert_eq!(percent_encode_component("a*b"), "a%2Ab");
        assert_eq!(percent_encode_component("a~b-_.c"), "a~b-_.c");
        assert_eq!(percent_encode_component("a/b=c&d"), "a%2Fb%3Dc%26d");
    }

    #[test]
    fn non_ascii_values_are_fully_escaped() {
        assert_eq!(percent_encode_component("报表"), "%E6%8A%A5%E8%A1%A8");
    }

    #[test]
    fn canonical_query_is_sorted_by_key() {
        let query = canonicalized_query(&params(&[
            ("Timestamp", "2026-08-05T08:00:00Z"),
            ("Action", "DescribeSlowLogs"),
            ("PageSize", "100"),
        ]));
        assert_eq!(
            query,
            "Action=DescribeSlowLogs&PageSize=100&Timestamp=2026-08-05T08%3A00%3A00Z"
        );
    }

    #[test]
    fn signature_is_deterministic_for_same_input() {
        let pairs = params(&[("Action", "DescribeSlowLogs"), ("PageNumber", "1")]);
        let first = sign_request("GET", &pairs, "testsecret").expect("sign should succeed");
        let second = sign_request("GET", &pairs, "testsecret").expect("sign should succeed");
        assert_eq!(first, second);
        // base64 of a 20-byte SHA1 digest
        assert_eq!(first.len(), 28);
    }

    #[test]
    fn signature_depends_on_secret_and_params() {
        let pairs = params(&[("Action", "DescribeSlowLogs")]);
        let baseline = sign_request("GET", &pairs, "testsecret").expect("sign should succeed");

        let other_secret = sign_request("GET", &pairs, "othersecret").expect("sign should succeed");
        assert_ne!(baseline, other_secret);

        let other_params = params(&[("Action", "DescribeSlowLogRecords")]);
        let other = sign_request("GET", &other_params, "testsecret").expect("sign should succeed");
        assert_ne!(baseline, other);
    }
}
