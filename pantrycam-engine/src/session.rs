use crate::encoder::EncodeError;
use crate::traits::OutputSurface;
use pantrycam_core::types::PipelineOutcome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Idle,
    Validating,
    Stage1InFlight,
    Stage1Done,
    Stage2InFlight,
    Terminal,
}

impl PipelineState {
    // Stable labels for UI/log display, not derived from `Debug`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Stage1InFlight => "detecting",
            Self::Stage1Done => "detected",
            Self::Stage2InFlight => "finding_recipes",
            Self::Terminal => "done",
        }
    }
}

/// Why a run failed. Only the message reaches the display.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no image or prompt provided")]
    Validation,
    #[error("{0}")]
    Transport(String),
    #[error("{0}")]
    Semantic(String),
    #[error("{0}")]
    Encode(#[from] EncodeError),
}

impl From<PipelineError> for PipelineOutcome {
    fn from(e: PipelineError) -> Self {
        match e {
            PipelineError::Validation => PipelineOutcome::ValidationFailed,
            other => PipelineOutcome::failed(other.to_string()),
        }
    }
}

/// "A run is in flight" marker shared with whatever triggers runs.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Marks the flag busy and disables submit. Returns `None` if already busy.
    pub fn try_acquire(&self, surface: Arc<dyn OutputSurface>) -> Option<BusyGuard> {
        if self
            .0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return None;
        }
        surface.set_submit_enabled(false);
        Some(BusyGuard {
            flag: self.0.clone(),
            surface,
        })
    }
}

/// Re-enables submit when dropped, on every exit path.
pub struct BusyGuard {
    flag: Arc<AtomicBool>,
    surface: Arc<dyn OutputSurface>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        self.surface.set_submit_enabled(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSurface {
        enabled: Mutex<Vec<bool>>,
    }

    impl OutputSurface for RecordingSurface {
        fn show(&self, _markup: &str) {}
        fn set_submit_enabled(&self, enabled: bool) {
            self.enabled.lock().unwrap().push(enabled);
        }
    }

    #[test]
    fn guard_toggles_submit_and_flag() {
        let surface = Arc::new(RecordingSurface::default());
        let flag = BusyFlag::new();

        let guard = flag.try_acquire(surface.clone()).unwrap();
        assert!(flag.is_busy());
        assert!(flag.try_acquire(surface.clone()).is_none());

        drop(guard);
        assert!(!flag.is_busy());
        assert_eq!(*surface.enabled.lock().unwrap(), vec![false, true]);
    }

    #[test]
    fn guard_releases_on_panic() {
        let surface = Arc::new(RecordingSurface::default());
        let flag = BusyFlag::new();

        let f = flag.clone();
        let s = surface.clone();
        let res = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || {
            let _guard = f.try_acquire(s).unwrap();
            panic!("render blew up");
        }));

        assert!(res.is_err());
        assert!(!flag.is_busy());
        assert_eq!(surface.enabled.lock().unwrap().last(), Some(&true));
    }

    #[test]
    fn validation_error_maps_to_validation_outcome() {
        assert_eq!(
            PipelineOutcome::from(PipelineError::Validation),
            PipelineOutcome::ValidationFailed
        );
        assert_eq!(
            PipelineOutcome::from(PipelineError::Semantic("Unknown error from backend".into())),
            PipelineOutcome::failed("Unknown error from backend")
        );
    }
}
