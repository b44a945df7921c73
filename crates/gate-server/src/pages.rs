//! Landing page rendering.
//!
//! Upload feedback arrives as query parameters on the redirect target. The
//! values are client-controlled text; everything rendered here goes through
//! the escaping boundary first.

use gate_core::escape_html;

/// Split a request URL's query string into decoded key/value pairs.
pub fn query_pairs(url: &str) -> Vec<(String, String)> {
    let Some((_, query)) = url.split_once('?') else {
        return Vec::new();
    };
    query
        .split('&')
        .filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let key = urlencoding::decode(key).ok()?.into_owned();
            let value = urlencoding::decode(value).ok()?.into_owned();
            Some((key, value))
        })
        .collect()
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Render the landing page, with any upload feedback from the query string.
#[must_use]
pub fn landing(pairs: &[(String, String)]) -> String {
    let feedback = match first(pairs, "upload") {
        Some("success") => {
            let filename = first(pairs, "filename").unwrap_or("card");
            format!(
                "<p class=\"notice ok\">Stored <strong>{}</strong></p>",
                escape_html(filename)
            )
        }
        Some("error") => {
            let message = first(pairs, "message").unwrap_or("Upload failed.");
            format!("<p class=\"notice err\">{}</p>", escape_html(message))
        }
        _ => String::new(),
    };

    format!(
        "<!doctype html>\n<html><head><title>Gatehouse</title></head><body>\n\
         <h1>Gatehouse</h1>\n{feedback}\n\
         <form method=\"post\" action=\"/upload\" enctype=\"multipart/form-data\">\n\
         <input type=\"file\" name=\"imageFile\" accept=\"image/*\">\n\
         <button type=\"submit\">Upload card</button>\n\
         </form>\n</body></html>\n"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn query_pairs_decode_percent_escapes() {
        let pairs = query_pairs("/?upload=error&message=File%20too%20large.");
        assert_eq!(
            pairs,
            vec![
                ("upload".to_owned(), "error".to_owned()),
                ("message".to_owned(), "File too large.".to_owned())
            ]
        );
    }

    #[test]
    fn no_query_string_means_no_pairs() {
        assert!(query_pairs("/").is_empty());
    }

    #[test]
    fn success_feedback_shows_the_stored_name() {
        let pairs = query_pairs("/?upload=success&filename=A1.png");
        let html = landing(&pairs);
        assert!(html.contains("Stored <strong>A1.png</strong>"));
    }

    #[test]
    fn feedback_is_escaped_before_rendering() {
        let pairs = query_pairs("/?upload=error&message=%3Cscript%3Ealert(1)%3C%2Fscript%3E");
        let html = landing(&pairs);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn plain_visit_renders_only_the_form() {
        let html = landing(&[]);
        assert!(html.contains("imageFile"));
        assert!(!html.contains("notice"));
    }
}
