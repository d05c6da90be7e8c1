use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::state::DashEvent;

pub const DEFAULT_TICK_MS: u64 = 50;
pub const DEFAULT_ADVANCE_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackMode {
    Running,
    Paused,
}

/// Auto-advance state. Elapsed time is tracked in whole milliseconds so progress after
/// N ticks is exact.
#[derive(Debug, Clone)]
pub struct PlaybackController {
    pub current_index: usize,
    mode: PlaybackMode,
    elapsed_ms: u64,
    tick_ms: u64,
    total_ms: u64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_MS, DEFAULT_ADVANCE_MS)
    }
}

impl PlaybackController {
    pub fn new(tick_ms: u64, total_ms: u64) -> Self {
        let tick_ms = tick_ms.max(1);
        Self {
            current_index: 0,
            mode: PlaybackMode::Running,
            elapsed_ms: 0,
            tick_ms,
            total_ms: total_ms.max(tick_ms),
        }
    }

    pub fn mode(&self) -> PlaybackMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.mode == PlaybackMode::Paused
    }

    pub fn progress(&self) -> f64 {
        self.elapsed_ms as f64 / self.total_ms as f64
    }

    pub fn tick_ms(&self) -> u64 {
        self.tick_ms
    }

    pub fn pause(&mut self) {
        self.mode = PlaybackMode::Paused;
    }

    pub fn resume(&mut self) {
        self.mode = PlaybackMode::Running;
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused {
            self.pause();
        } else {
            self.resume();
        }
    }

    pub fn tick(&mut self, len: usize) -> bool {
        if self.mode == PlaybackMode::Paused || len == 0 {
            return false;
        }
        self.elapsed_ms += self.tick_ms;
        if self.elapsed_ms < self.total_ms {
            return false;
        }
        self.elapsed_ms = 0;
        self.current_index = (self.current_index + 1) % len;
        true
    }

    pub fn select(&mut self, index: usize) {
        self.current_index = index;
        self.elapsed_ms = 0;
    }

    pub fn clamp(&mut self, len: usize) {
        if len == 0 {
            self.current_index = 0;
        } else if self.current_index >= len {
            self.current_index = len - 1;
        }
    }
}

pub struct PlaybackClock {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl PlaybackClock {
    pub fn spawn(tick: Duration, tx: Sender<DashEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop);
        let handle = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                thread::sleep(tick);
                if flag.load(Ordering::Relaxed) {
                    break;
                }
                if tx.send(DashEvent::Tick).is_err() {
                    break;
                }
            }
        });
        Self {
            stop,
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for PlaybackClock {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
