use std::time::{Duration, Instant};

pub const FADE_DURATION: Duration = Duration::from_millis(500);
pub const INTRO_DURATION: Duration = Duration::from_millis(500);

/// A single pending deadline. Re-arming replaces the previous deadline; dropping or
/// cancelling discards it.
#[derive(Debug, Clone, Default)]
pub struct ScopedTimer {
    armed: Option<(Instant, Duration)>,
}

impl ScopedTimer {
    pub fn arm(&mut self, now: Instant, duration: Duration) {
        self.armed = Some((now, duration));
    }

    pub fn cancel(&mut self) {
        self.armed = None;
    }

    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    pub fn fraction(&self, now: Instant) -> f64 {
        let Some((start, duration)) = self.armed else {
            return 1.0;
        };
        if duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(start);
        (elapsed.as_secs_f64() / duration.as_secs_f64()).min(1.0)
    }

    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        let Some((start, duration)) = self.armed else {
            return false;
        };
        if now.saturating_duration_since(start) < duration {
            return false;
        }
        self.armed = None;
        true
    }
}

pub fn ease_cubic_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) - 1.0;
    t * t * t + 1.0
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerLabel {
    pub name: String,
    pub team: String,
    pub rank: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadePhase {
    Visible,
    FadingOut,
}

#[derive(Debug, Clone, Default)]
pub struct FadeLabel {
    displayed: PlayerLabel,
    target: PlayerLabel,
    timer: ScopedTimer,
}

impl FadeLabel {
    pub fn displayed(&self) -> &PlayerLabel {
        &self.displayed
    }

    pub fn phase(&self) -> FadePhase {
        if self.timer.is_armed() {
            FadePhase::FadingOut
        } else {
            FadePhase::Visible
        }
    }

    pub fn opacity(&self, now: Instant) -> f64 {
        match self.phase() {
            FadePhase::Visible => 1.0,
            FadePhase::FadingOut => 1.0 - self.timer.fraction(now),
        }
    }

    pub fn set_target(&mut self, target: PlayerLabel, now: Instant) {
        if target == self.target && (self.timer.is_armed() || target == self.displayed) {
            return;
        }
        self.target = target;
        if self.target == self.displayed {
            self.timer.cancel();
        } else {
            self.timer.arm(now, FADE_DURATION);
        }
    }

    pub fn update(&mut self, now: Instant) {
        if self.timer.fire_if_due(now) {
            self.displayed = self.target.clone();
        }
    }
}
