//! # gate-server
//!
//! The kiosk HTTP surface:
//! - `POST /upload` — single multipart file field, answered purely via a
//!   redirect whose query parameters carry the outcome
//! - `GET|HEAD /idcards/<name>` — stored card serving; HEAD answers
//!   existence-only, which is what the resolver's probes hit
//! - `GET /` — minimal landing page rendering upload feedback escaped
//!
//! Requests are handled one at a time on the accept loop; every request is
//! self-contained and a bad one never takes the loop down.

pub mod assets;
pub mod multipart;
pub mod pages;
pub mod upload;

pub use upload::{StoredUpload, UPLOAD_FIELD, UploadError};

use std::io::Read;

use gate_config::GateConfig;
use thiserror::Error;
use tiny_http::{Header, Method, Request, Response};

use crate::assets::AssetReply;

/// Slack on top of the file cap for boundary lines and part headers when
/// reading an upload body.
const BODY_OVERHEAD: u64 = 64 * 1024;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind kiosk server: {0}")]
    Bind(String),
}

/// The kiosk server, bound and ready to serve.
pub struct KioskServer {
    server: tiny_http::Server,
    config: GateConfig,
}

impl KioskServer {
    /// Bind the configured listen address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::Bind`] when the address cannot be bound.
    pub fn bind(config: GateConfig) -> Result<Self, ServerError> {
        let server = tiny_http::Server::http(config.server.bind.as_str())
            .map_err(|e| ServerError::Bind(e.to_string()))?;
        Ok(Self { server, config })
    }

    /// The port actually bound. Relevant when configured with port 0.
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.server.server_addr().to_ip().map(|a| a.port())
    }

    /// Serve requests until the process ends.
    pub fn run(&self) {
        tracing::info!(bind = %self.config.server.bind, "kiosk server listening");
        for request in self.server.incoming_requests() {
            self.handle(request);
        }
    }

    fn handle(&self, request: Request) {
        let method = request.method().clone();
        let url = request.url().to_owned();
        tracing::debug!(%method, %url, "request");

        let path = url.split('?').next().unwrap_or(&url).to_owned();

        if path == "/upload" {
            if method == Method::Post {
                self.handle_upload(request);
            } else {
                // Wrong method: back to the landing page, no error detail.
                respond(request, redirect(&self.config.server.redirect));
            }
            return;
        }

        if method == Method::Get || method == Method::Head {
            if let Some(name) = path.strip_prefix("/idcards/") {
                self.handle_asset(request, &method, name);
                return;
            }
            if path == "/" {
                let pairs = pages::query_pairs(&url);
                let response = Response::from_string(pages::landing(&pairs))
                    .with_header(header("Content-Type", "text/html; charset=utf-8"));
                respond(request, response);
                return;
            }
        }

        respond(
            request,
            Response::from_string("not found").with_status_code(404),
        );
    }

    fn handle_upload(&self, mut request: Request) {
        let outcome = self.process_upload(&mut request);
        if let Err(error) = &outcome {
            tracing::debug!(%error, "upload rejected");
        }
        let target = upload::redirect_target(&self.config.server.redirect, &outcome);
        respond(request, redirect(&target));
    }

    /// Steps 1–2 of the upload state machine (request shape and body
    /// framing); the rest lives in [`upload::store_part`].
    fn process_upload(&self, request: &mut Request) -> Result<StoredUpload, UploadError> {
        let boundary = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Content-Type"))
            .map(|h| h.value.as_str().to_owned())
            .and_then(|value| multipart::boundary_from_content_type(&value))
            .ok_or(UploadError::NotUpload)?;

        let limit = self.config.upload.max_bytes + BODY_OVERHEAD;
        let mut body = Vec::new();
        request
            .as_reader()
            .take(limit + 1)
            .read_to_end(&mut body)
            .map_err(|e| UploadError::Part {
                detail: e.to_string(),
            })?;
        if body.len() as u64 > limit {
            return Err(UploadError::TooLarge {
                cap: self.config.upload.max_human(),
            });
        }

        let parts = multipart::parse(&body, &boundary).map_err(|e| UploadError::Part {
            detail: e.to_string(),
        })?;
        let part = parts
            .iter()
            .find(|p| p.field == UPLOAD_FIELD && p.filename.is_some())
            .ok_or(UploadError::NotUpload)?;

        upload::store_part(part, &self.config.upload)
    }

    fn handle_asset(&self, request: Request, method: &Method, name: &str) {
        match assets::lookup(&self.config.upload.dir, name) {
            AssetReply::NotFound => respond(
                request,
                Response::from_string("not found").with_status_code(404),
            ),
            AssetReply::Found {
                path,
                len,
                content_type,
            } => {
                if *method == Method::Head {
                    // Existence-only answer: no body is ever read.
                    let response = Response::empty(200)
                        .with_header(header("Content-Type", content_type))
                        .with_header(header("Content-Length", &len.to_string()));
                    respond(request, response);
                    return;
                }
                match std::fs::File::open(&path) {
                    Ok(file) => {
                        let response = Response::from_file(file)
                            .with_header(header("Content-Type", content_type));
                        respond(request, response);
                    }
                    Err(error) => {
                        tracing::warn!(path = %path.display(), %error, "failed to open stored card");
                        respond(
                            request,
                            Response::from_string("internal error").with_status_code(500),
                        );
                    }
                }
            }
        }
    }
}

fn redirect(target: &str) -> Response<std::io::Empty> {
    Response::empty(303).with_header(header("Location", target))
}

fn header(field: &str, value: &str) -> Header {
    Header::from_bytes(field.as_bytes(), value.as_bytes()).unwrap()
}

fn respond<R: Read>(request: Request, response: Response<R>) {
    if let Err(error) = request.respond(response) {
        tracing::warn!(%error, "failed to send response");
    }
}
