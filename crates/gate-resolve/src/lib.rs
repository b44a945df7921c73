//! # gate-resolve
//!
//! Determines whether a displayable ID-card asset exists for an agent code by
//! probing `<base>/<code>.<ext>` for each extension in the fixed order
//! `jpg`, `jpeg`, `png`, `webp`.
//!
//! Probes run strictly in sequence — each one is awaited before the next
//! begins — and the first hit wins, so resolution is deterministic even when
//! several variants exist. A transport hiccup on one extension is treated the
//! same as a miss for that extension and never aborts the whole pass.

mod probe;

pub use probe::{AutoProbe, ExistenceProbe, FsProbe, HttpProbe, ProbeError};

use gate_core::{AgentCode, Extension, Resolution};

/// Extension-fallback resolver over some existence probe.
#[derive(Debug, Clone)]
pub struct Resolver<P> {
    probe: P,
    base: String,
}

impl Resolver<AutoProbe> {
    /// Resolver for a base location, probing over HTTP when the base is a URL
    /// and the filesystem otherwise.
    #[must_use]
    pub fn for_base(base: &str) -> Self {
        Self::new(AutoProbe::for_base(base), base)
    }
}

impl<P: ExistenceProbe> Resolver<P> {
    #[must_use]
    pub fn new(probe: P, base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { probe, base }
    }

    /// Probe the extension order for `code` and return the first hit.
    ///
    /// "Not found" is a result, not an error: all four extensions missing
    /// yields a [`Resolution`] with no resolved location and all four listed
    /// as tried. The caller decides what to render.
    pub async fn resolve(&self, code: &AgentCode) -> Resolution {
        let mut tried = Vec::with_capacity(Extension::PROBE_ORDER.len());

        for ext in Extension::PROBE_ORDER {
            let location = format!("{}/{}.{}", self.base, code, ext);
            tried.push(ext);

            match self.probe.exists(&location).await {
                Ok(true) => {
                    tracing::debug!(%location, "asset found");
                    return Resolution {
                        resolved: Some(location),
                        tried,
                    };
                }
                Ok(false) => {}
                Err(error) => {
                    // Transient probe failure: same as a miss for this
                    // extension, keep going.
                    tracing::debug!(%location, %error, "probe failed, trying next extension");
                }
            }
        }

        Resolution {
            resolved: None,
            tried,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use gate_core::CodePolicy;
    use pretty_assertions::assert_eq;

    use super::*;

    /// Scripted probe: records every location it is asked about.
    struct FakeProbe {
        present: Vec<&'static str>,
        failing: Vec<&'static str>,
        asked: Mutex<Vec<String>>,
    }

    impl FakeProbe {
        fn new(present: Vec<&'static str>, failing: Vec<&'static str>) -> Self {
            Self {
                present,
                failing,
                asked: Mutex::new(Vec::new()),
            }
        }

        fn asked(&self) -> Vec<String> {
            self.asked.lock().unwrap().clone()
        }
    }

    impl ExistenceProbe for FakeProbe {
        async fn exists(&self, location: &str) -> Result<bool, ProbeError> {
            self.asked.lock().unwrap().push(location.to_owned());
            if self.failing.iter().any(|f| location.ends_with(f)) {
                return Err(ProbeError::Io(std::io::Error::other("flaky link")));
            }
            Ok(self.present.iter().any(|p| location.ends_with(p)))
        }
    }

    fn code(s: &str) -> AgentCode {
        AgentCode::parse(s, &CodePolicy::Alphanumeric { min: 1, max: 20 }).unwrap()
    }

    #[tokio::test]
    async fn stops_at_first_hit_and_never_probes_later_extensions() {
        let probe = FakeProbe::new(vec!["A1.png", "A1.webp"], vec![]);
        let resolver = Resolver::new(probe, "idcards");

        let resolution = resolver.resolve(&code("A1")).await;

        assert_eq!(resolution.resolved.as_deref(), Some("idcards/A1.png"));
        assert_eq!(
            resolution.tried,
            vec![Extension::Jpg, Extension::Jpeg, Extension::Png]
        );
        assert_eq!(
            resolver.probe.asked(),
            vec!["idcards/A1.jpg", "idcards/A1.jpeg", "idcards/A1.png"]
        );
    }

    #[tokio::test]
    async fn empty_base_tries_all_four_in_order() {
        let probe = FakeProbe::new(vec![], vec![]);
        let resolver = Resolver::new(probe, "idcards/");

        let resolution = resolver.resolve(&code("Z9")).await;

        assert!(!resolution.found());
        assert_eq!(resolution.tried, Extension::PROBE_ORDER.to_vec());
        assert_eq!(
            resolver.probe.asked(),
            vec![
                "idcards/Z9.jpg",
                "idcards/Z9.jpeg",
                "idcards/Z9.png",
                "idcards/Z9.webp"
            ]
        );
    }

    #[tokio::test]
    async fn transport_failure_on_one_extension_does_not_abort() {
        let probe = FakeProbe::new(vec!["A1.png"], vec!["A1.jpg"]);
        let resolver = Resolver::new(probe, "idcards");

        let resolution = resolver.resolve(&code("A1")).await;

        assert_eq!(resolution.resolved.as_deref(), Some("idcards/A1.png"));
    }

    #[tokio::test]
    async fn repeated_misses_are_identical() {
        let probe = FakeProbe::new(vec![], vec![]);
        let resolver = Resolver::new(probe, "idcards");

        let first = resolver.resolve(&code("Z9")).await;
        let second = resolver.resolve(&code("Z9")).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn fs_resolver_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("A1.png"), b"png bytes").unwrap();

        let resolver = Resolver::new(FsProbe, dir.path().to_str().unwrap());
        let resolution = resolver.resolve(&code("A1")).await;

        assert!(resolution.found());
        assert!(resolution.resolved.unwrap().ends_with("A1.png"));
        assert_eq!(
            resolution.tried,
            vec![Extension::Jpg, Extension::Jpeg, Extension::Png]
        );

        let miss = resolver.resolve(&code("Z9")).await;
        assert!(!miss.found());
        assert_eq!(miss.tried, Extension::PROBE_ORDER.to_vec());
    }
}
