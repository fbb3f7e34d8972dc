//! Scripted controller input.

use std::cell::RefCell;
use std::rc::Rc;

use rigcal_traits::{Chirality, InputSource};

#[derive(Debug, Default)]
struct Timeline {
    t: f32,
    prev_t: f32,
    press_both_at: Option<f32>,
}

/// Input timeline: optionally presses both designated buttons at a fixed time
/// and holds them for the rest of the run. Handles are cheap clones over
/// shared state; the host advances its clone once per frame while the session
/// owns the other.
#[derive(Clone)]
pub struct SimInput(Rc<RefCell<Timeline>>);

impl SimInput {
    /// No buttons are ever touched.
    pub fn idle() -> Self {
        Self(Rc::new(RefCell::new(Timeline::default())))
    }

    /// Both designated buttons go down at `at` seconds and stay held.
    pub fn hold_both_at(at: f32) -> Self {
        Self(Rc::new(RefCell::new(Timeline {
            press_both_at: Some(at),
            ..Timeline::default()
        })))
    }

    pub fn advance(&self, dt: f32) {
        let mut timeline = self.0.borrow_mut();
        timeline.prev_t = timeline.t;
        timeline.t += dt;
    }
}

impl InputSource for SimInput {
    fn button_down(&self, _side: Chirality) -> bool {
        let timeline = self.0.borrow();
        timeline
            .press_both_at
            .is_some_and(|at| timeline.prev_t <= at && timeline.t > at)
    }

    fn button_up(&self, _side: Chirality) -> bool {
        false
    }

    fn hold_duration(&self, _side: Chirality) -> f32 {
        let timeline = self.0.borrow();
        timeline
            .press_both_at
            .map_or(0.0, |at| (timeline.t - at).max(0.0))
    }

    fn arm_bind_pressed(&self, _side: Chirality) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_edge_fires_exactly_once() {
        let input = SimInput::hold_both_at(0.1);
        let mut edges = 0;
        for _ in 0..20 {
            input.advance(0.02);
            if input.button_down(Chirality::Left) {
                edges += 1;
            }
        }
        assert_eq!(edges, 1);
        assert!(input.hold_duration(Chirality::Left) > 0.2);
    }

    #[test]
    fn idle_input_never_presses() {
        let input = SimInput::idle();
        for _ in 0..20 {
            input.advance(0.02);
            assert!(!input.button_down(Chirality::Right));
            assert_eq!(input.hold_duration(Chirality::Right), 0.0);
        }
    }
}
