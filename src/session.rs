//! Single-user page state and the guard around the model call.
//!
//! `Idle -> Collecting -> Generating -> Displayed`. A failed or cancelled
//! generation falls back to `Collecting`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use scopeguard::ScopeGuard;

use crate::error::AppError;
use crate::models::GeneratedReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    Collecting,
    Generating,
    Displayed,
}

#[derive(Debug, Default)]
struct ReportSession {
    phase: Phase,
    busy: bool,
    report: Option<GeneratedReport>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub phase: Phase,
    /// True while the action control is disabled.
    pub busy: bool,
    pub report: Option<GeneratedReport>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<Mutex<ReportSession>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ReportSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let session = self.lock();
        SessionSnapshot {
            phase: session.phase,
            busy: session.busy,
            report: session.report.clone(),
        }
    }

    /// A form submission counts as a field edit.
    pub fn touch(&self) {
        let mut session = self.lock();
        if session.phase != Phase::Generating {
            session.phase = Phase::Collecting;
        }
    }

    /// Report from the last successful generation, if no attempt has
    /// started since.
    pub fn current_report(&self) -> Option<GeneratedReport> {
        self.lock().report.clone()
    }

    /// Disables the action control and enters `Generating`.
    ///
    /// Any previously offered report is withdrawn so that a failed attempt
    /// never leaves stale content downloadable.
    pub fn begin_generation(&self) -> Result<GenerationGuard, AppError> {
        {
            let mut session = self.lock();
            if session.busy {
                return Err(AppError::GenerationInProgress);
            }
            session.busy = true;
            session.phase = Phase::Generating;
            session.report = None;
        }

        Ok(GenerationGuard {
            session: scopeguard::guard(self.clone(), release as fn(SessionHandle)),
        })
    }
}

fn release(handle: SessionHandle) {
    let mut session = handle.lock();
    session.busy = false;
    if session.phase == Phase::Generating {
        session.phase = Phase::Collecting;
    }
}

/// Held for the duration of one model call. Dropping it re-enables the
/// action control on every exit path, including a dropped request future.
pub struct GenerationGuard {
    session: ScopeGuard<SessionHandle, fn(SessionHandle)>,
}

impl GenerationGuard {
    pub fn complete(self, report: GeneratedReport) {
        {
            let mut session = self.session.lock();
            session.report = Some(report);
            session.phase = Phase::Displayed;
        }
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(text: &str) -> GeneratedReport {
        GeneratedReport {
            text: text.to_string(),
            file_name: "structural_defect_report.txt".to_string(),
        }
    }

    #[test]
    fn starts_idle_and_moves_to_collecting_on_edit() {
        let session = SessionHandle::new();
        assert_eq!(session.snapshot().phase, Phase::Idle);
        session.touch();
        assert_eq!(session.snapshot().phase, Phase::Collecting);
    }

    #[test]
    fn successful_generation_displays_and_reenables() {
        let session = SessionHandle::new();
        session.touch();

        let guard = session.begin_generation().unwrap();
        let during = session.snapshot();
        assert_eq!(during.phase, Phase::Generating);
        assert!(during.busy);

        guard.complete(report("REPORT-X"));
        let after = session.snapshot();
        assert_eq!(after.phase, Phase::Displayed);
        assert!(!after.busy);
        assert_eq!(after.report, Some(report("REPORT-X")));
    }

    #[test]
    fn dropped_guard_returns_to_collecting() {
        let session = SessionHandle::new();
        session.touch();
        {
            let _guard = session.begin_generation().unwrap();
        }
        let after = session.snapshot();
        assert_eq!(after.phase, Phase::Collecting);
        assert!(!after.busy);
        assert!(after.report.is_none());
    }

    #[test]
    fn second_press_is_rejected_while_busy() {
        let session = SessionHandle::new();
        let _guard = session.begin_generation().unwrap();
        assert!(matches!(
            session.begin_generation(),
            Err(AppError::GenerationInProgress)
        ));
    }

    #[test]
    fn new_attempt_withdraws_previous_report() {
        let session = SessionHandle::new();
        session.begin_generation().unwrap().complete(report("old"));
        assert!(session.current_report().is_some());

        let guard = session.begin_generation().unwrap();
        assert!(session.current_report().is_none());
        drop(guard);
        assert!(session.current_report().is_none());
    }

    #[test]
    fn edit_during_generation_keeps_generating() {
        let session = SessionHandle::new();
        let _guard = session.begin_generation().unwrap();
        session.touch();
        assert_eq!(session.snapshot().phase, Phase::Generating);
    }
}
