//! The upload state machine.
//!
//! Single pass, no retries: field present → declared type allowed → size under
//! the cap → target directory exists → no name collision → store. Every
//! outcome, success or failure, is communicated through redirect query
//! parameters built by [`redirect_target`].

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use gate_config::UploadConfig;
use thiserror::Error;

use crate::multipart::FilePart;

/// The form field the kiosk upload form posts the card under.
pub const UPLOAD_FIELD: &str = "imageFile";

/// Typed upload failures. Display strings are the user-facing messages that
/// travel in the `message=` redirect parameter.
#[derive(Debug, Error)]
pub enum UploadError {
    /// Wrong method, not multipart, or no usable file field. Redirects home
    /// with no error detail at all.
    #[error("not an upload request")]
    NotUpload,

    /// The multipart body could not be walked.
    #[error("Upload failed: {detail}")]
    Part { detail: String },

    #[error("Invalid file type. Only images are allowed.")]
    Type { declared: String },

    /// The message states the enforced cap, so text and enforcement cannot
    /// drift apart.
    #[error("File too large. Maximum size is {cap}.")]
    TooLarge { cap: String },

    #[error("File already exists. Please rename your file.")]
    Exists,

    #[error("Failed to save file. Please try again.")]
    Store,
}

/// A stored card, keyed by the sanitized filename it was saved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredUpload {
    pub filename: String,
}

/// Run the type/size/collision/store steps for an extracted file part.
///
/// # Errors
///
/// Returns the [`UploadError`] matching the first failing step.
pub fn store_part(part: &FilePart, config: &UploadConfig) -> Result<StoredUpload, UploadError> {
    let declared = part.content_type.clone().unwrap_or_default();
    if !config.accepts_type(&declared) {
        return Err(UploadError::Type { declared });
    }

    if part.data.len() as u64 > config.max_bytes {
        return Err(UploadError::TooLarge {
            cap: config.max_human(),
        });
    }

    // Storage names come from a restricted character set, never verbatim
    // client input.
    let stored_name = part
        .filename
        .as_deref()
        .and_then(sanitize_filename)
        .ok_or(UploadError::Store)?;

    std::fs::create_dir_all(&config.dir).map_err(|_| UploadError::Store)?;

    let target = Path::new(&config.dir).join(&stored_name);
    if target.exists() {
        return Err(UploadError::Exists);
    }

    write_new(&target, &part.data).map_err(|error| {
        if error.kind() == io::ErrorKind::AlreadyExists {
            UploadError::Exists
        } else {
            tracing::warn!(target = %target.display(), %error, "failed to store upload");
            UploadError::Store
        }
    })?;

    tracing::info!(filename = %stored_name, bytes = part.data.len(), "card stored");
    Ok(StoredUpload {
        filename: stored_name,
    })
}

/// Create-new write: never clobbers a file that appeared between the
/// collision check and the store.
fn write_new(target: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)?;
    file.write_all(data)
}

/// Derive the storage name from the client-supplied one: basename only,
/// restricted to `[A-Za-z0-9._-]`, leading and trailing dots stripped.
/// Returns `None` when nothing usable remains.
pub fn sanitize_filename(raw: &str) -> Option<String> {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();
    let cleaned = cleaned.trim_matches('.');
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_owned())
    }
}

/// Build the redirect target for an upload outcome. All feedback travels in
/// query parameters; there is no JSON variant and no status-code
/// differentiation beyond the redirect itself.
pub fn redirect_target(base: &str, outcome: &Result<StoredUpload, UploadError>) -> String {
    match outcome {
        Ok(stored) => format!(
            "{base}?upload=success&filename={}",
            urlencoding::encode(&stored.filename)
        ),
        Err(UploadError::NotUpload) => base.to_owned(),
        Err(error) => format!(
            "{base}?upload=error&message={}",
            urlencoding::encode(&error.to_string())
        ),
    }
}
