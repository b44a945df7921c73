//! Payload shape detection: absolute URLs, structured JSON, bare codes.

use gate_core::ScanMetadata;
use serde_json::Value;

/// Candidate keys, in priority order. The first present non-empty value wins.
const CODE_KEYS: [&str; 3] = ["agentCode", "code", "id"];

/// Whether `input` starts with an RFC 3986 scheme followed by `:`.
///
/// This mirrors what a browser `URL` constructor accepts as absolute; the
/// decoder never tries to pull a code out of a path, only the query string.
pub(crate) fn is_absolute_url(input: &str) -> bool {
    let Some(colon) = input.find(':') else {
        return false;
    };
    let scheme = &input[..colon];
    let mut chars = scheme.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    first.is_ascii_alphabetic()
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Extract the first value of `param` from a URL's query string,
/// percent-decoded. Case-sensitive key match, direct value extraction.
pub(crate) fn query_param(url: &str, param: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);
    for pair in query.split('&') {
        if let Some((key, value)) = pair.split_once('=') {
            if key == param && !value.is_empty() {
                return urlencoding::decode(value).ok().map(|v| v.into_owned());
            }
        }
    }
    None
}

/// Classify a non-URL payload into a candidate code plus carried metadata.
///
/// A JSON object yields the first usable `agentCode`/`code`/`id` value and the
/// recognized display fields. Anything that is not a JSON object — including
/// JSON scalars — is treated as a bare code. A JSON object without a usable
/// key falls back to the whole payload as candidate, which then fails shape
/// validation downstream with the raw text attached.
pub(crate) fn classify(trimmed: &str) -> (String, ScanMetadata) {
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) else {
        return (trimmed.to_owned(), ScanMetadata::default());
    };

    let meta: ScanMetadata =
        serde_json::from_value(Value::Object(map.clone())).unwrap_or_default();

    for key in CODE_KEYS {
        match map.get(key) {
            Some(Value::String(s)) if !s.is_empty() => return (s.clone(), meta),
            Some(Value::Number(n)) => return (n.to_string(), meta),
            _ => {}
        }
    }

    (trimmed.to_owned(), meta)
}
