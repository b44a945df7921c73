//! Serialization of scan cycles.
//!
//! Scanner input fires on a fixed tick regardless of how long the previous
//! decode/resolve cycle takes. [`ScanGate`] is the explicit busy flag: at most
//! one cycle holds a [`ScanPermit`]; an attempt arriving while one is in
//! flight is skipped, never queued. The permit releases the gate on drop, so
//! release happens on every exit path, including errors.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Try-acquire gate shared between the input source and in-flight cycles.
#[derive(Debug, Clone, Default)]
pub struct ScanGate {
    busy: Arc<AtomicBool>,
}

impl ScanGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the gate for one cycle. Returns `None` while a previous cycle
    /// still holds its permit.
    #[must_use]
    pub fn try_begin(&self) -> Option<ScanPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScanPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Held for the duration of one decode/resolve cycle.
#[derive(Debug)]
pub struct ScanPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ScanPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_attempt_is_skipped_while_permit_held() {
        let gate = ScanGate::new();
        let permit = gate.try_begin().expect("gate starts free");
        assert!(gate.is_busy());
        assert!(gate.try_begin().is_none());
        drop(permit);
        assert!(!gate.is_busy());
        assert!(gate.try_begin().is_some());
    }

    #[test]
    fn permit_releases_even_when_the_cycle_errors() {
        let gate = ScanGate::new();
        let attempt = || -> Result<(), &'static str> {
            let _permit = gate.try_begin().ok_or("busy")?;
            Err("decode failed")
        };
        assert_eq!(attempt(), Err("decode failed"));
        assert!(!gate.is_busy());
    }

    #[test]
    fn clones_share_the_same_flag() {
        let gate = ScanGate::new();
        let other = gate.clone();
        let _permit = gate.try_begin().unwrap();
        assert!(other.is_busy());
        assert!(other.try_begin().is_none());
    }
}
