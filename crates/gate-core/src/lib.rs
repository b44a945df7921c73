//! # gate-core
//!
//! Core types shared across Gatehouse crates:
//! - [`AgentCode`] and the configurable [`CodePolicy`] validation pipeline
//! - [`ScanMetadata`] display fields carried alongside a decoded code
//! - [`Extension`] probe order and [`Resolution`] results
//! - [`escape_html`], the escaping boundary for untrusted display text
//! - [`ScanGate`], the busy-flag permit that serializes scan cycles

pub mod code;
pub mod escape;
pub mod metadata;
pub mod resolution;
pub mod scan_gate;

pub use code::{AgentCode, CodePolicy, CodeViolation};
pub use escape::escape_html;
pub use metadata::ScanMetadata;
pub use resolution::{Extension, Resolution};
pub use scan_gate::{ScanGate, ScanPermit};
