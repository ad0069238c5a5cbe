use crate::gesture::domain::gesture_classifier::GestureToken;
use crate::shared::constants::GESTURE_DELAY;

/// Suppresses repeated discrete gestures for a fixed number of frames.
///
/// `fire` is consulted while dispatching a frame and `tick` runs once at the
/// end of every frame, so a gesture fired at frame `n` blocks frames
/// `n + 1 ..= n + delay - 1` and the next one is accepted at `n + delay`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebounceGate {
    delay: u32,
    armed: bool,
    countdown: u32,
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(GESTURE_DELAY)
    }
}

impl DebounceGate {
    pub fn new(delay: u32) -> Self {
        Self {
            delay,
            armed: false,
            countdown: 0,
        }
    }

    /// Frames left before the gate reopens; 0 when open.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    pub fn is_open(&self) -> bool {
        !self.armed
    }

    /// Returns whether `token` may act this frame. Continuous tokens always
    /// pass and never arm the gate.
    pub fn fire(&mut self, token: GestureToken) -> bool {
        if !token.is_discrete() {
            return true;
        }
        if self.armed {
            log::trace!("Gesture '{token}' debounced ({} frames left)", self.countdown);
            return false;
        }
        self.armed = true;
        self.countdown = self.delay;
        true
    }

    /// End-of-frame countdown.
    pub fn tick(&mut self) {
        if !self.armed {
            return;
        }
        self.countdown = self.countdown.saturating_sub(1);
        if self.countdown == 0 {
            self.armed = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_fire_then_blocked_until_delay_elapses() {
        let mut gate = DebounceGate::new(15);

        assert!(gate.fire(GestureToken::Next));
        assert_eq!(gate.countdown(), 15);
        gate.tick();

        for frame in 1..15 {
            assert!(!gate.fire(GestureToken::Next), "frame {frame}");
            gate.tick();
        }

        assert!(gate.fire(GestureToken::Next));
        assert_eq!(gate.countdown(), 15);
    }

    #[rstest]
    #[case::draw(GestureToken::Draw)]
    #[case::point(GestureToken::Point)]
    #[case::none(GestureToken::None)]
    fn test_continuous_tokens_pass_while_armed(#[case] token: GestureToken) {
        let mut gate = DebounceGate::new(15);
        assert!(gate.fire(GestureToken::Prev));
        gate.tick();
        assert!(gate.fire(token));
        assert_eq!(gate.countdown(), 14);
    }

    #[test]
    fn test_default_blocks_for_gesture_delay() {
        let mut gate = DebounceGate::default();
        assert!(gate.fire(GestureToken::End));
        assert_eq!(gate.countdown(), GESTURE_DELAY);
    }

    #[test]
    fn test_continuous_tokens_do_not_arm() {
        let mut gate = DebounceGate::default();
        assert!(gate.fire(GestureToken::Draw));
        assert!(gate.is_open());
        assert!(gate.fire(GestureToken::Start));
        assert!(!gate.is_open());
    }

    #[test]
    fn test_blocked_fire_does_not_restart_countdown() {
        let mut gate = DebounceGate::new(5);
        gate.fire(GestureToken::Next);
        gate.tick();
        gate.tick();
        assert!(!gate.fire(GestureToken::Prev));
        assert_eq!(gate.countdown(), 3);
    }

    #[test]
    fn test_tick_when_open_is_noop() {
        let mut gate = DebounceGate::new(3);
        gate.tick();
        assert_eq!(gate.countdown(), 0);
        assert!(gate.is_open());
    }

    #[test]
    fn test_zero_delay_never_blocks() {
        let mut gate = DebounceGate::new(0);
        assert!(gate.fire(GestureToken::Next));
        gate.tick();
        assert!(gate.fire(GestureToken::Next));
    }
}
