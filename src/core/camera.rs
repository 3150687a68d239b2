//! Decode feed driven by text lines.
//!
//! USB and Bluetooth barcode scanners in keyboard mode "type" the decoded
//! payload followed by Enter, so a line on stdin is one decode. The feed
//! keeps the running/paused flag the controller toggles; lines read while
//! paused are dropped by the controller.

use crate::core::scanner::CameraFeed;
use crate::errors::AppResult;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::debug;

#[derive(Debug, Default)]
pub struct LineFeed {
    running: AtomicBool,
    starts: AtomicU64,
}

impl LineFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times the feed was (re)initialized.
    pub fn starts(&self) -> u64 {
        self.starts.load(Ordering::SeqCst)
    }
}

impl CameraFeed for LineFeed {
    fn pause(&self) -> AppResult<()> {
        if self.running.swap(false, Ordering::SeqCst) {
            debug!("feed paused");
        }
        Ok(())
    }

    fn resume(&self) -> AppResult<()> {
        if !self.running.swap(true, Ordering::SeqCst) {
            debug!("feed resumed");
        }
        Ok(())
    }

    fn reinitialize(&self) -> AppResult<()> {
        let n = self.starts.fetch_add(1, Ordering::SeqCst) + 1;
        self.running.store(true, Ordering::SeqCst);
        debug!(starts = n, "feed initialized");
        Ok(())
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
