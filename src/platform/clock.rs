//! Session clock
//!
//! Turns the host's monotonic timestamp (`performance.now()` in the browser)
//! into session time: zero at start, frozen while paused.

/// Session time source with pause accounting
#[derive(Debug, Clone, Default)]
pub struct SessionClock {
    /// Host time at session start
    start: f64,
    /// Total host time spent paused
    paused_total: f64,
    /// Host time the current pause began
    paused_at: Option<f64>,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart at session time 0
    pub fn start(&mut self, host: f64) {
        *self = Self {
            start: host,
            paused_total: 0.0,
            paused_at: None,
        };
    }

    pub fn pause(&mut self, host: f64) {
        if self.paused_at.is_none() {
            self.paused_at = Some(host);
        }
    }

    pub fn resume(&mut self, host: f64) {
        if let Some(at) = self.paused_at.take() {
            self.paused_total += (host - at).max(0.0);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    /// Session milliseconds at host time `host`
    pub fn now(&self, host: f64) -> f64 {
        let host = self.paused_at.unwrap_or(host);
        (host - self.start - self.paused_total).max(0.0)
    }
}
