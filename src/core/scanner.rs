//! Scanner session controller.
//!
//! Sits between a continuous decode feed (a camera, or a keyboard-wedge
//! scanner typing codes) and the two mutually exclusive network actions,
//! check-in and check-out.
//!
//! Guarantees:
//! - at most one action is in flight (single-slot guard held across the
//!   request);
//! - a decode is accepted only if nothing is in flight, the feed is running
//!   and at least [`SCAN_COOLDOWN`] elapsed since the last accepted decode;
//! - the mode is read from a shared cell when the decode is accepted, so a
//!   callback registered long ago still sees the latest mode, and toggling
//!   during a request never retargets that request.

use crate::errors::{AppError, AppResult};
use crate::models::AttendanceReceipt;
use crate::utils::date::format_clock;
use crate::utils::formatting::format_checkout_duration;
use async_trait::async_trait;
use clap::ValueEnum;
use std::fmt;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Minimum spacing between two accepted decodes.
pub const SCAN_COOLDOWN: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ScanMode {
    #[default]
    CheckIn,
    CheckOut,
}

impl ScanMode {
    pub fn toggled(self) -> Self {
        match self {
            ScanMode::CheckIn => ScanMode::CheckOut,
            ScanMode::CheckOut => ScanMode::CheckIn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScanMode::CheckIn => "Check In",
            ScanMode::CheckOut => "Check Out",
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScanMode::CheckIn => "check-in",
            ScanMode::CheckOut => "check-out",
        })
    }
}

/// The two network actions a scan can trigger.
#[async_trait]
pub trait CheckinBackend: Send + Sync {
    async fn check_in(&self, member_id: &str) -> AppResult<AttendanceReceipt>;
    async fn check_out(&self, member_id: &str) -> AppResult<AttendanceReceipt>;
}

/// Capture device feeding decodes. Owned exclusively by the controller,
/// which is the only one pausing and resuming it.
pub trait CameraFeed: Send + Sync {
    fn pause(&self) -> AppResult<()>;
    /// Continue a paused feed without tearing it down.
    fn resume(&self) -> AppResult<()>;
    /// Tear the feed down and start it again (running afterwards).
    fn reinitialize(&self) -> AppResult<()>;
    fn is_running(&self) -> bool;
}

/// Errors shown to the operator after a failed scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanFailure {
    AlreadyCheckedIn,
    NotCheckedIn,
    MemberNotFound,
    NoActiveAttendance,
    Other { mode: ScanMode, detail: String },
}

impl ScanFailure {
    /// Map a failed request to what the operator sees. Conflict statuses
    /// (400 or 409) and 404 carry a meaning that depends on the action;
    /// everything else is generic.
    pub fn classify(mode: ScanMode, err: &AppError) -> Self {
        match (mode, err.status()) {
            (ScanMode::CheckIn, Some(400 | 409)) => ScanFailure::AlreadyCheckedIn,
            (ScanMode::CheckIn, Some(404)) => ScanFailure::MemberNotFound,
            (ScanMode::CheckOut, Some(400 | 409)) => ScanFailure::NotCheckedIn,
            (ScanMode::CheckOut, Some(404)) => ScanFailure::NoActiveAttendance,
            _ => ScanFailure::Other {
                mode,
                detail: err.to_string(),
            },
        }
    }

    fn is_expected(&self) -> bool {
        !matches!(self, ScanFailure::Other { .. })
    }
}

impl fmt::Display for ScanFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanFailure::AlreadyCheckedIn => f.write_str("Member is already checked in"),
            ScanFailure::NotCheckedIn => f.write_str("Member is not checked in"),
            ScanFailure::MemberNotFound => f.write_str("Member not found"),
            ScanFailure::NoActiveAttendance => {
                f.write_str("Member not found or no active attendance record")
            }
            ScanFailure::Other { mode: ScanMode::CheckIn, .. } => f.write_str("Check-in failed"),
            ScanFailure::Other { mode: ScanMode::CheckOut, .. } => f.write_str("Check-out failed"),
        }
    }
}

/// A settled, successful scan.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanSuccess {
    pub mode: ScanMode,
    pub member_id: String,
    pub receipt: AttendanceReceipt,
}

impl ScanSuccess {
    /// `Check-in successful at 09:03:12` or
    /// `Check-out successful. Duration: 1h 30m`.
    pub fn message(&self) -> String {
        match self.mode {
            ScanMode::CheckIn => match &self.receipt.check_in {
                Some(ts) => format!("Check-in successful at {}", format_clock(ts)),
                None => "Check-in successful".to_string(),
            },
            ScanMode::CheckOut => format!(
                "Check-out successful. Duration: {}",
                format_checkout_duration(self.receipt.duration.unwrap_or(0))
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ScanState {
    #[default]
    Scanning,
    Processing,
    Succeeded(ScanSuccess),
    Failed(ScanFailure),
}

/// Transient client-side state of one scanner run.
#[derive(Debug, Clone, Default)]
pub struct ScanSession {
    pub last_scan: Option<Instant>,
    pub processing: bool,
    /// payload of the last accepted decode
    pub last_result: Option<String>,
    pub state: ScanState,
}

impl ScanSession {
    /// Back to the initial shape. The cooldown reference survives so a
    /// reset cannot be used to slip a duplicate decode through.
    fn clear(&mut self) {
        let last_scan = self.last_scan;
        *self = ScanSession {
            last_scan,
            ..ScanSession::default()
        };
    }
}

/// Why a decode produced no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Empty,
    Busy,
    Paused,
    Cooldown,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeOutcome {
    Ignored(IgnoreReason),
    Succeeded(ScanSuccess),
    Failed(ScanFailure),
}

pub struct ScannerController<B, C> {
    backend: B,
    camera: C,
    mode: watch::Sender<ScanMode>,
    session: Mutex<ScanSession>,
    in_flight: tokio::sync::Mutex<()>,
    cooldown: Duration,
}

impl<B: CheckinBackend, C: CameraFeed> ScannerController<B, C> {
    pub fn new(backend: B, camera: C, mode: ScanMode) -> Self {
        let (tx, _rx) = watch::channel(mode);
        Self {
            backend,
            camera,
            mode: tx,
            session: Mutex::new(ScanSession::default()),
            in_flight: tokio::sync::Mutex::new(()),
            cooldown: SCAN_COOLDOWN,
        }
    }

    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    /// Current mode, as seen right now.
    pub fn mode(&self) -> ScanMode {
        *self.mode.borrow()
    }

    /// Receiver following mode changes, for status displays.
    pub fn subscribe_mode(&self) -> watch::Receiver<ScanMode> {
        self.mode.subscribe()
    }

    pub fn state(&self) -> ScanState {
        self.lock_session().state.clone()
    }

    pub fn snapshot(&self) -> ScanSession {
        self.lock_session().clone()
    }

    pub fn is_processing(&self) -> bool {
        self.lock_session().processing
    }

    fn lock_session(&self) -> MutexGuard<'_, ScanSession> {
        // a panic while holding the lock leaves plain data behind; keep going
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Start the feed for a fresh run.
    pub fn start(&self) -> AppResult<()> {
        self.lock_session().clear();
        self.camera.reinitialize()
    }

    /// Handle one decoded payload from the feed.
    pub async fn on_decoded(&self, code: &str) -> AppResult<DecodeOutcome> {
        let code = code.trim();
        if code.is_empty() {
            return Ok(DecodeOutcome::Ignored(IgnoreReason::Empty));
        }

        let Ok(_slot) = self.in_flight.try_lock() else {
            debug!(code, "decode ignored: request in flight");
            return Ok(DecodeOutcome::Ignored(IgnoreReason::Busy));
        };

        let mode = {
            let mut session = self.lock_session();

            if session.processing {
                return Ok(DecodeOutcome::Ignored(IgnoreReason::Busy));
            }
            if !self.camera.is_running() {
                debug!(code, "decode ignored: feed paused");
                return Ok(DecodeOutcome::Ignored(IgnoreReason::Paused));
            }

            let now = Instant::now();
            if let Some(last) = session.last_scan
                && now.duration_since(last) < self.cooldown
            {
                debug!(code, "decode ignored: scan too soon");
                return Ok(DecodeOutcome::Ignored(IgnoreReason::Cooldown));
            }

            session.last_scan = Some(now);
            session.processing = true;
            session.last_result = Some(code.to_string());
            session.state = ScanState::Processing;

            // read the mode at acceptance time; later toggles do not apply
            *self.mode.borrow()
        };

        info!(code, %mode, "scan accepted");
        if let Err(e) = self.camera.pause() {
            let mut session = self.lock_session();
            session.processing = false;
            session.state = ScanState::Scanning;
            return Err(e);
        }

        let result = match mode {
            ScanMode::CheckIn => self.backend.check_in(code).await,
            ScanMode::CheckOut => self.backend.check_out(code).await,
        };

        self.settle(mode, code, result)
    }

    fn settle(
        &self,
        mode: ScanMode,
        code: &str,
        result: AppResult<AttendanceReceipt>,
    ) -> AppResult<DecodeOutcome> {
        match result {
            Ok(receipt) => {
                let success = ScanSuccess {
                    mode,
                    member_id: code.to_string(),
                    receipt,
                };
                info!(code, %mode, "scan processed");

                match mode {
                    ScanMode::CheckIn => {
                        {
                            let mut session = self.lock_session();
                            session.processing = false;
                            session.state = ScanState::Succeeded(success.clone());
                        }
                        // result stays on screen until the operator moves on
                        self.camera.pause()?;
                    }
                    ScanMode::CheckOut => {
                        self.lock_session().clear();
                        self.camera.reinitialize()?;
                    }
                }
                Ok(DecodeOutcome::Succeeded(success))
            }
            Err(err) => {
                let failure = ScanFailure::classify(mode, &err);
                if failure.is_expected() {
                    info!(code, %mode, reason = %failure, "scan rejected");
                } else {
                    error!(code, %mode, error = %err, "scan request failed");
                }

                {
                    let mut session = self.lock_session();
                    session.processing = false;
                    session.state = ScanState::Failed(failure.clone());
                }
                self.camera.pause()?;
                Ok(DecodeOutcome::Failed(failure))
            }
        }
    }

    /// "Try again" / "Scan another": drop the shown result or error,
    /// re-initialize the feed and go back to scanning. With nothing on
    /// screen the feed is only resumed. A request still in flight is left
    /// alone.
    pub fn reset(&self) -> AppResult<()> {
        let settled = {
            let mut session = self.lock_session();
            if session.processing {
                session.last_result = None;
                false
            } else {
                let settled = session.state != ScanState::Scanning;
                session.clear();
                settled
            }
        };
        if settled {
            self.camera.reinitialize()
        } else {
            self.camera.resume()
        }
    }

    /// Switch between check-in and check-out. Pauses the feed, flips the
    /// mode, clears any previous result and restarts the feed.
    pub fn toggle_mode(&self) -> AppResult<ScanMode> {
        self.camera.pause()?;

        let mut new_mode = ScanMode::default();
        self.mode.send_modify(|m| {
            *m = m.toggled();
            new_mode = *m;
        });
        info!(mode = %new_mode, "scan mode changed");

        {
            let mut session = self.lock_session();
            if !session.processing {
                session.clear();
            }
        }
        self.camera.reinitialize()?;
        Ok(new_mode)
    }

    /// Put the feed down when the scanner view goes away.
    pub fn shutdown(&self) -> AppResult<()> {
        self.camera.pause()
    }
}
