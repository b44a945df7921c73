//! Stored card lookup, including the existence-only answers HEAD probes get.

use std::path::{Path, PathBuf};

use crate::upload::sanitize_filename;

/// What the asset route found for a requested name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetReply {
    NotFound,
    Found {
        path: PathBuf,
        len: u64,
        content_type: &'static str,
    },
}

/// Look up a stored card by requested filename.
///
/// Only names that already match the restricted storage charset are served:
/// anything a sanitization pass would change cannot have been stored by the
/// upload handler, so it is answered as not found rather than resolved
/// against the filesystem.
pub fn lookup(dir: &str, requested: &str) -> AssetReply {
    let Some(name) = sanitize_filename(requested) else {
        return AssetReply::NotFound;
    };
    if name != requested {
        return AssetReply::NotFound;
    }

    let path = Path::new(dir).join(&name);
    match std::fs::metadata(&path) {
        Ok(meta) if meta.is_file() => AssetReply::Found {
            path,
            len: meta.len(),
            content_type: content_type_for(&name),
        },
        _ => AssetReply::NotFound,
    }
}

fn content_type_for(name: &str) -> &'static str {
    match name.rsplit('.').next() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn present_card_is_found_with_its_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A1.png"), b"png bytes").unwrap();

        let reply = lookup(dir.path().to_str().unwrap(), "A1.png");
        assert!(matches!(
            reply,
            AssetReply::Found {
                len: 9,
                content_type: "image/png",
                ..
            }
        ));
    }

    #[test]
    fn absent_card_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            lookup(dir.path().to_str().unwrap(), "Z9.webp"),
            AssetReply::NotFound
        );
    }

    #[test]
    fn traversal_names_are_never_resolved() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A1.png"), b"png").unwrap();

        for name in ["../A1.png", "..%2FA1.png", "a/../A1.png", ""] {
            assert_eq!(
                lookup(dir.path().to_str().unwrap(), name),
                AssetReply::NotFound,
                "{name} must not resolve"
            );
        }
    }

    #[test]
    fn content_types_cover_the_probe_extensions() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("a.png"), "image/png");
        assert_eq!(content_type_for("a.webp"), "image/webp");
        assert_eq!(content_type_for("a.gif"), "image/gif");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
