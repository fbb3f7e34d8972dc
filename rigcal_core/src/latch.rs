//! Hold-to-trigger debounce latch for the designated calibration button.
//!
//! Replaces accumulated boolean arithmetic with an explicit three-state
//! machine: a latch arms on a press edge while arming is allowed, is consumed
//! once its trigger fires, and returns to idle only when the button is
//! released.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoldLatch {
    #[default]
    Idle,
    Armed,
    Consumed,
}

impl HoldLatch {
    /// Feed this frame's button edges. `may_arm` is false while a session is
    /// already active, so presses during calibration never arm the latch.
    pub fn update(&mut self, went_down: bool, released: bool, may_arm: bool) {
        if released {
            *self = HoldLatch::Idle;
            return;
        }
        if went_down && may_arm && *self == HoldLatch::Idle {
            *self = HoldLatch::Armed;
        }
    }

    pub fn is_armed(self) -> bool {
        self == HoldLatch::Armed
    }

    /// Mark the latch as spent; it stays spent until the button is released.
    pub fn consume(&mut self) {
        if *self == HoldLatch::Armed {
            *self = HoldLatch::Consumed;
        }
    }

    pub fn reset(&mut self) {
        *self = HoldLatch::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::HoldLatch;

    #[test]
    fn arms_on_press_edge_and_clears_on_release() {
        let mut latch = HoldLatch::default();
        latch.update(true, false, true);
        assert!(latch.is_armed());
        latch.update(false, true, true);
        assert!(!latch.is_armed());
        assert_eq!(latch, HoldLatch::Idle);
    }

    #[test]
    fn does_not_arm_while_arming_is_blocked() {
        let mut latch = HoldLatch::default();
        latch.update(true, false, false);
        assert_eq!(latch, HoldLatch::Idle);
    }

    #[test]
    fn consumed_latch_stays_spent_until_release() {
        let mut latch = HoldLatch::default();
        latch.update(true, false, true);
        latch.consume();
        assert_eq!(latch, HoldLatch::Consumed);
        // Still held: no re-arm even though the press edge is long gone.
        latch.update(false, false, true);
        assert_eq!(latch, HoldLatch::Consumed);
        // Release, then a fresh press edge arms again.
        latch.update(false, true, true);
        latch.update(true, false, true);
        assert!(latch.is_armed());
    }

    #[test]
    fn consume_is_a_no_op_when_idle() {
        let mut latch = HoldLatch::default();
        latch.consume();
        assert_eq!(latch, HoldLatch::Idle);
    }
}
