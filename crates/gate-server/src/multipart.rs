//! Minimal multipart/form-data parsing for the upload endpoint.
//!
//! tiny_http hands us the raw body; the endpoint only ever needs the single
//! file part, so this walks the boundary-delimited sections directly instead
//! of pulling in a full multipart implementation.

use thiserror::Error;

/// A multipart body that could not be walked.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("malformed multipart body: {0}")]
pub struct MultipartError(&'static str);

/// One part extracted from a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name from the Content-Disposition header.
    pub field: String,
    /// Client-supplied filename, verbatim and untrusted.
    pub filename: Option<String>,
    /// Declared Content-Type of the part, if any.
    pub content_type: Option<String>,
    pub data: Vec<u8>,
}

/// Extract the boundary token from a request Content-Type header value.
///
/// Returns `None` when the request is not `multipart/form-data` or carries
/// no boundary attribute.
pub fn boundary_from_content_type(value: &str) -> Option<String> {
    let mut attrs = value.split(';');
    let kind = attrs.next()?.trim();
    if !kind.eq_ignore_ascii_case("multipart/form-data") {
        return None;
    }
    for attr in attrs {
        if let Some(token) = attr.trim().strip_prefix("boundary=") {
            let token = token.trim_matches('"');
            if !token.is_empty() {
                return Some(token.to_owned());
            }
        }
    }
    None
}

/// Parse every part of `body` delimited by `boundary`.
///
/// # Errors
///
/// Returns [`MultipartError`] when the body does not follow the
/// `--boundary` / CRLF framing.
pub fn parse(body: &[u8], boundary: &str) -> Result<Vec<FilePart>, MultipartError> {
    let delim_owned = format!("--{boundary}");
    let delim = delim_owned.as_bytes();

    let mut parts = Vec::new();
    let Some(start) = find(body, delim, 0) else {
        return Err(MultipartError("boundary never appears in body"));
    };

    let mut pos = start;
    loop {
        pos += delim.len();
        if body[pos..].starts_with(b"--") {
            // Closing delimiter.
            break;
        }
        if body[pos..].starts_with(b"\r\n") {
            pos += 2;
        } else {
            return Err(MultipartError("boundary line not CRLF-terminated"));
        }

        let Some(header_end) = find(body, b"\r\n\r\n", pos) else {
            return Err(MultipartError("part headers never terminate"));
        };
        let headers = std::str::from_utf8(&body[pos..header_end])
            .map_err(|_| MultipartError("part headers are not UTF-8"))?;

        let data_start = header_end + 4;
        let Some(next) = find(body, delim, data_start) else {
            return Err(MultipartError("part data never terminates"));
        };
        // Part data runs up to the CRLF preceding the next delimiter.
        let data_end = next
            .checked_sub(2)
            .filter(|end| *end >= data_start && &body[*end..next] == b"\r\n")
            .ok_or(MultipartError("part data not CRLF-terminated"))?;

        parts.push(part_from(headers, body[data_start..data_end].to_vec())?);
        pos = next;
    }

    Ok(parts)
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if from > haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|i| i + from)
}

fn part_from(headers: &str, data: Vec<u8>) -> Result<FilePart, MultipartError> {
    let mut field = None;
    let mut filename = None;
    let mut content_type = None;

    for line in headers.split("\r\n") {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key.eq_ignore_ascii_case("content-disposition") {
            for attr in value.split(';').skip(1) {
                let attr = attr.trim();
                if let Some(v) = attr.strip_prefix("name=") {
                    field = Some(unquote(v));
                } else if let Some(v) = attr.strip_prefix("filename=") {
                    filename = Some(unquote(v));
                }
            }
        } else if key.eq_ignore_ascii_case("content-type") {
            content_type = Some(value.to_owned());
        }
    }

    let field = field.ok_or(MultipartError("part without a field name"))?;
    Ok(FilePart {
        field,
        filename,
        content_type,
        data,
    })
}

fn unquote(value: &str) -> String {
    value.trim_matches('"').to_owned()
}
