//! Success overlay lifetime

use std::time::{Duration, Instant};

/// Lifetime phase of the success overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPhase {
    /// Fully opaque
    Visible,
    /// Fading out before removal
    Fading,
    /// Gone from the page
    Removed,
}

/// Timing of the overlay: how long it stays up and how long the fade takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayTiming {
    pub display: Duration,
    pub fade: Duration,
}

impl OverlayTiming {
    pub fn lifetime(&self) -> Duration {
        self.display + self.fade
    }
}

impl Default for OverlayTiming {
    fn default() -> Self {
        Self {
            display: Duration::from_millis(3000),
            fade: Duration::from_millis(300),
        }
    }
}

/// A centered confirmation shown after an accepted submission.
///
/// The phase is advanced by scheduled tasks; opacity is derived from the
/// clock so the fade animates between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessOverlay {
    pub shown_at: Instant,
    pub timing: OverlayTiming,
    pub phase: OverlayPhase,
    pub title: String,
    pub body: String,
}

impl SuccessOverlay {
    pub fn new(shown_at: Instant, timing: OverlayTiming, title: &str, body: &str) -> Self {
        Self {
            shown_at,
            timing,
            phase: OverlayPhase::Visible,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    /// When the fade starts
    pub fn fade_at(&self) -> Instant {
        self.shown_at + self.timing.display
    }

    /// When the overlay leaves the page
    pub fn remove_at(&self) -> Instant {
        self.shown_at + self.timing.lifetime()
    }

    pub fn begin_fade(&mut self) {
        if self.phase == OverlayPhase::Visible {
            self.phase = OverlayPhase::Fading;
        }
    }

    pub fn remove(&mut self) {
        self.phase = OverlayPhase::Removed;
    }

    /// Opacity in `0.0..=1.0` at `now`
    pub fn opacity(&self, now: Instant) -> f32 {
        match self.phase {
            OverlayPhase::Visible => 1.0,
            OverlayPhase::Removed => 0.0,
            OverlayPhase::Fading => {
                if self.timing.fade.is_zero() {
                    return 0.0;
                }
                let elapsed = now.saturating_duration_since(self.fade_at());
                let progress =
                    (elapsed.as_secs_f32() / self.timing.fade.as_secs_f32()).clamp(0.0, 1.0);
                1.0 - simple_easing::cubic_in(progress)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(t0: Instant) -> SuccessOverlay {
        SuccessOverlay::new(t0, OverlayTiming::default(), "Thank you!", "Sent")
    }

    #[test]
    fn test_default_lifetime_is_3300ms() {
        assert_eq!(
            OverlayTiming::default().lifetime(),
            Duration::from_millis(3300)
        );
    }

    #[test]
    fn test_new_starts_visible_and_opaque() {
        let t0 = Instant::now();
        let o = overlay(t0);
        assert_eq!(o.phase, OverlayPhase::Visible);
        assert_eq!(o.opacity(t0 + Duration::from_millis(2999)), 1.0);
    }

    #[test]
    fn test_deadlines() {
        let t0 = Instant::now();
        let o = overlay(t0);
        assert_eq!(o.fade_at(), t0 + Duration::from_millis(3000));
        assert_eq!(o.remove_at(), t0 + Duration::from_millis(3300));
    }

    #[test]
    fn test_fade_decreases_opacity() {
        let t0 = Instant::now();
        let mut o = overlay(t0);
        o.begin_fade();

        let start = o.opacity(o.fade_at());
        let middle = o.opacity(o.fade_at() + Duration::from_millis(150));
        let end = o.opacity(o.remove_at());

        assert_eq!(start, 1.0);
        assert!(middle < 1.0 && middle > 0.0);
        assert_eq!(end, 0.0);
    }

    #[test]
    fn test_begin_fade_after_removal_is_ignored() {
        let t0 = Instant::now();
        let mut o = overlay(t0);
        o.remove();
        o.begin_fade();
        assert_eq!(o.phase, OverlayPhase::Removed);
        assert_eq!(o.opacity(t0), 0.0);
    }

    #[test]
    fn test_zero_fade_is_transparent_immediately() {
        let t0 = Instant::now();
        let mut o = SuccessOverlay::new(
            t0,
            OverlayTiming {
                display: Duration::from_millis(10),
                fade: Duration::ZERO,
            },
            "t",
            "b",
        );
        o.begin_fade();
        assert_eq!(o.opacity(t0), 0.0);
    }
}
