use chrono::{DateTime, Duration, Local};

/// Detects the built-in enable/disable gesture: two touch-starts with
/// exactly three fingers down, less than 300 ms apart.
///
/// Every qualifying tap re-arms the window, so a third three-finger tap
/// shortly after a toggle toggles again.
pub struct TapToggle {
    required_touches: usize,
    window: Duration,
    last_tap: Option<DateTime<Local>>,
}

impl Default for TapToggle {
    fn default() -> Self {
        Self::new(3, Duration::milliseconds(300))
    }
}

impl TapToggle {
    pub fn new(required_touches: usize, window: Duration) -> Self {
        Self {
            required_touches,
            window,
            last_tap: None,
        }
    }

    /// Feeds one touch-start observation with the number of touches now
    /// down. Returns `true` when the double tap completes.
    pub fn observe(&mut self, touches_down: usize, at: DateTime<Local>) -> bool {
        if touches_down != self.required_touches {
            return false;
        }
        let toggled = match self.last_tap {
            Some(previous) => at - previous < self.window,
            None => false,
        };
        self.last_tap = Some(at);
        toggled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(t0: DateTime<Local>, ms: i64) -> DateTime<Local> {
        t0 + Duration::milliseconds(ms)
    }

    #[test]
    fn two_taps_inside_the_window_toggle() {
        let mut gesture = TapToggle::default();
        let t0 = Local::now();
        assert!(!gesture.observe(3, t0));
        assert!(gesture.observe(3, at(t0, 299)));
    }

    #[test]
    fn slow_taps_do_not_toggle() {
        let mut gesture = TapToggle::default();
        let t0 = Local::now();
        assert!(!gesture.observe(3, t0));
        assert!(!gesture.observe(3, at(t0, 300)), "window is strictly less than 300 ms");
        assert!(!gesture.observe(3, at(t0, 1000)));
    }

    #[test]
    fn wrong_finger_count_is_ignored() {
        let mut gesture = TapToggle::default();
        let t0 = Local::now();
        assert!(!gesture.observe(3, t0));
        assert!(!gesture.observe(2, at(t0, 100)), "two fingers never count");
        // The two-finger tap did not disturb the armed window.
        assert!(gesture.observe(3, at(t0, 200)));
    }

    #[test]
    fn every_qualifying_tap_rearms_the_window() {
        let mut gesture = TapToggle::default();
        let t0 = Local::now();
        assert!(!gesture.observe(3, t0));
        assert!(gesture.observe(3, at(t0, 200)));
        assert!(gesture.observe(3, at(t0, 400)), "200 ms after the previous tap");
    }
}
