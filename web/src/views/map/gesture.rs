use shared_types::Coordinate;

/// Hold duration after which a press on the map surface selects that point.
pub const LONG_PRESS_MS: f64 = 2000.0;

/// Identifies one press. A fired timer only counts if its token still
/// matches the live press, so a timer surviving past pointer-up (or racing
/// a newer press from the other input family) can never select a location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PressToken(u64);

#[derive(Debug, Clone, Copy)]
struct Press {
    at: Coordinate,
    started_ms: f64,
    token: u64,
}

/// Pointer gesture state machine for the map surface. Distinguishes plain
/// click, double-click, and long-press; knows nothing about the widget or
/// timers, so it is testable with plain timestamps.
#[derive(Debug)]
pub struct GestureDetector {
    select_mode: bool,
    press: Option<Press>,
    next_token: u64,
}

impl GestureDetector {
    pub fn new(select_mode: bool) -> Self {
        Self {
            select_mode,
            press: None,
            next_token: 0,
        }
    }

    pub fn select_mode(&self) -> bool {
        self.select_mode
    }

    /// Flips click behavior when the surrounding page enters or leaves
    /// report mode. A press in flight keeps its original timing.
    pub fn set_select_mode(&mut self, select_mode: bool) {
        self.select_mode = select_mode;
    }

    /// A press begins. Any previous press (e.g. from the other input family)
    /// is superseded, which invalidates its timer token. The caller arms a
    /// `LONG_PRESS_MS` timer carrying the returned token.
    pub fn pointer_down(&mut self, at: Coordinate, now_ms: f64) -> PressToken {
        self.next_token += 1;
        let token = self.next_token;
        self.press = Some(Press {
            at,
            started_ms: now_ms,
            token,
        });
        PressToken(token)
    }

    /// Released before the timer fired: no action, press forgotten.
    pub fn pointer_up(&mut self) {
        self.press = None;
    }

    /// The map started panning; a drag never selects a location.
    pub fn drag(&mut self) {
        self.press = None;
    }

    /// The long-press timer fired. Selects the pressed-down coordinate only
    /// if the same press is still held and the threshold truly elapsed;
    /// clears the press either way so a press fires at most once.
    pub fn long_press_elapsed(&mut self, token: PressToken, now_ms: f64) -> Option<Coordinate> {
        let press = self.press?;
        if press.token != token.0 {
            return None;
        }
        self.press = None;
        if now_ms - press.started_ms >= LONG_PRESS_MS {
            Some(press.at)
        } else {
            None
        }
    }

    /// A plain click selects a location only in select mode; otherwise it is
    /// left to the widget's own marker/popup handling.
    pub fn click(&self, at: Coordinate) -> Option<Coordinate> {
        self.select_mode.then_some(at)
    }

    /// A double-click always selects, and clears any press racing it so the
    /// long-press timer cannot fire afterwards.
    pub fn double_click(&mut self, at: Coordinate) -> Coordinate {
        self.press = None;
        at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Coordinate = Coordinate::new(13.0290, 80.0189);

    #[test]
    fn release_at_1999ms_does_not_fire() {
        let mut detector = GestureDetector::new(false);
        let token = detector.pointer_down(P, 0.0);
        detector.pointer_up();
        assert_eq!(detector.long_press_elapsed(token, 1999.0), None);
        // Even a late-firing timer finds no press to act on.
        assert_eq!(detector.long_press_elapsed(token, 2500.0), None);
    }

    #[test]
    fn hold_for_2000ms_fires_exactly_once() {
        let mut detector = GestureDetector::new(false);
        let token = detector.pointer_down(P, 0.0);
        assert_eq!(detector.long_press_elapsed(token, 2000.0), Some(P));
        assert_eq!(detector.long_press_elapsed(token, 2000.0), None);
    }

    #[test]
    fn timer_firing_early_is_ignored() {
        let mut detector = GestureDetector::new(false);
        let token = detector.pointer_down(P, 100.0);
        assert_eq!(detector.long_press_elapsed(token, 1500.0), None);
    }

    #[test]
    fn drag_suppresses_long_press_even_past_threshold() {
        let mut detector = GestureDetector::new(false);
        let token = detector.pointer_down(P, 0.0);
        detector.drag();
        assert_eq!(detector.long_press_elapsed(token, 2500.0), None);
    }

    #[test]
    fn superseding_press_invalidates_the_old_timer() {
        let mut detector = GestureDetector::new(false);
        let first = detector.pointer_down(P, 0.0);
        let second = detector.pointer_down(P, 50.0);
        assert_eq!(detector.long_press_elapsed(first, 2500.0), None);
        assert_eq!(detector.long_press_elapsed(second, 2500.0), Some(P));
    }

    #[test]
    fn click_selects_only_in_select_mode() {
        let selecting = GestureDetector::new(true);
        assert_eq!(selecting.click(P), Some(P));

        let browsing = GestureDetector::new(false);
        assert_eq!(browsing.click(P), None);
    }

    #[test]
    fn double_click_wins_over_a_pending_press() {
        let mut detector = GestureDetector::new(false);
        let token = detector.pointer_down(P, 0.0);
        let picked = detector.double_click(Coordinate::new(13.03, 80.02));
        assert_eq!(picked, Coordinate::new(13.03, 80.02));
        assert_eq!(detector.long_press_elapsed(token, 2500.0), None);
    }
}
