use nalgebra::{UnitQuaternion, Vector3};
use rigcal_core::{ArmBindingClassifier, ClassifierCfg, Commit, Verdict};
use rigcal_traits::{Chirality, NodeSample, WarnKind};
use rstest::rstest;
use std::f32::consts::FRAC_PI_2;

const DT: f32 = 0.02; // 50 Hz frame

fn lowered(side: Chirality) -> UnitQuaternion<f32> {
    // Points the arm's outward vector straight down.
    let angle = match side {
        Chirality::Left => FRAC_PI_2,
        Chirality::Right => -FRAC_PI_2,
    };
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

fn raised(side: Chirality) -> UnitQuaternion<f32> {
    let angle = match side {
        Chirality::Left => -FRAC_PI_2,
        Chirality::Right => FRAC_PI_2,
    };
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle)
}

fn resting(orientation: UnitQuaternion<f32>) -> NodeSample {
    NodeSample::new(Vector3::new(0.0, 9.8, 0.0), orientation)
}

/// Acceleration alternating well past the noise floor, so every frame flips
/// the oscillation direction.
fn shaking(frame: usize, orientation: UnitQuaternion<f32>) -> NodeSample {
    let spike = if frame % 2 == 0 { 8.0 } else { 0.0 };
    NodeSample::new(Vector3::new(0.0, 9.8 + spike, 0.0), orientation)
}

fn horizontal() -> NodeSample {
    resting(UnitQuaternion::identity())
}

#[rstest]
#[case::left_dominates(Chirality::Left, true)]
#[case::right_dominates(Chirality::Right, false)]
fn dominant_shake_commits_with_expected_swap(
    #[case] shaker: Chirality,
    #[case] expect_swap: bool,
) {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(2);

    for frame in 0..200 {
        let quiet = resting(lowered(shaker.opposite()));
        let moving = shaking(frame, lowered(shaker));
        let (left, right) = match shaker {
            Chirality::Left => (moving, quiet),
            Chirality::Right => (quiet, moving),
        };
        match classifier.update(Some(&left), Some(&right), DT) {
            Verdict::Collecting => {}
            Verdict::Commit(commit) => {
                assert_eq!(commit.swap_left_right, expect_swap);
                assert!(!commit.revert_left);
                assert!(!commit.revert_right);
                return;
            }
            other => panic!("unexpected verdict at frame {frame}: {other:?}"),
        }
    }
    panic!("classifier never committed");
}

#[test]
fn zero_nodes_commit_on_first_tick() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(0);

    assert_eq!(
        classifier.update(None, None, DT),
        Verdict::Commit(Commit::accept())
    );
}

#[test]
fn single_node_commits_after_arms_down_window() {
    let cfg = ClassifierCfg::default();
    let gesture_window = cfg.arms_down_window_s;
    let mut classifier = ArmBindingClassifier::new(cfg);
    classifier.begin(1);
    assert!(classifier.chirality_locked());

    let mut elapsed = 0.0;
    for _ in 0..200 {
        let right = resting(lowered(Chirality::Right));
        elapsed += DT;
        match classifier.update(None, Some(&right), DT) {
            Verdict::Collecting => {}
            Verdict::Commit(commit) => {
                assert!(!commit.swap_left_right, "one node never swaps");
                assert!(!commit.revert_right);
                // Commits only once the gesture window has elapsed.
                assert!(elapsed >= gesture_window);
                return;
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }
    panic!("classifier never committed");
}

#[test]
fn reversed_mount_sets_revert_flag() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(1);

    for _ in 0..200 {
        // Outward vector accumulates upward: the mount is inverted.
        let right = resting(raised(Chirality::Right));
        match classifier.update(None, Some(&right), DT) {
            Verdict::Collecting => {}
            Verdict::Commit(commit) => {
                assert!(commit.revert_right);
                assert!(!commit.revert_left);
                return;
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }
    panic!("classifier never committed");
}

#[test]
fn swap_carries_reverts_across_roles() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(2);

    // Left node shakes (so roles swap) and sits inverted; right node is fine.
    for frame in 0..400 {
        let left = shaking(frame, raised(Chirality::Left));
        let right = resting(lowered(Chirality::Right));
        match classifier.update(Some(&left), Some(&right), DT) {
            Verdict::Collecting => {}
            Verdict::Commit(commit) => {
                assert!(commit.swap_left_right);
                // The inverted node ends up in the right role.
                assert!(commit.revert_right);
                assert!(!commit.revert_left);
                return;
            }
            other => panic!("unexpected verdict at frame {frame}: {other:?}"),
        }
    }
    panic!("classifier never committed");
}

#[test]
fn horizontal_arms_warn_then_expire_with_fresh_window() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(2);

    let mut warned = false;
    let mut expired = false;
    for _ in 0..400 {
        let left = horizontal();
        let right = horizontal();
        match classifier.update(Some(&left), Some(&right), DT) {
            Verdict::Collecting => {}
            Verdict::Warn(kind) => {
                assert_eq!(kind, WarnKind::ShakeHarder);
                warned = true;
            }
            Verdict::Expired => {
                assert!(warned, "warning precedes expiry");
                expired = true;
                break;
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }
    assert!(expired, "countdown must expire");

    // The follow-up window starts from zeroed accumulators.
    assert_eq!(classifier.left().tremble_count(), 0);
    assert_eq!(classifier.right().tremble_count(), 0);
    assert_eq!(
        classifier.update(Some(&horizontal()), Some(&horizontal()), DT),
        Verdict::Collecting
    );
}

#[test]
fn both_arms_shaking_warns_ambiguous() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(2);

    for frame in 0..400 {
        // Identical shakes on both sides: counts high, no dominance.
        let left = shaking(frame, UnitQuaternion::identity());
        let right = shaking(frame, UnitQuaternion::identity());
        match classifier.update(Some(&left), Some(&right), DT) {
            Verdict::Collecting => {}
            Verdict::Warn(kind) => {
                assert_eq!(kind, WarnKind::BothArmsAmbiguous);
                return;
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }
    panic!("classifier never warned");
}

#[test]
fn dominant_shake_with_horizontal_arms_locks_then_warns_lower() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(2);

    let mut locked_swap = None;
    for frame in 0..400 {
        // Right arm shakes but both arms stay horizontal: chirality resolves,
        // orientation never does.
        let left = horizontal();
        let right = shaking(frame, UnitQuaternion::identity());
        match classifier.update(Some(&left), Some(&right), DT) {
            Verdict::Collecting => {}
            Verdict::ChiralityLocked { swap } => {
                assert!(locked_swap.is_none(), "chirality locks once");
                assert!(!swap, "right dominance keeps roles");
                locked_swap = Some(swap);
            }
            Verdict::Warn(kind) => {
                assert!(locked_swap.is_some(), "lock precedes the warning");
                assert_eq!(kind, WarnKind::LowerArms);
                return;
            }
            other => panic!("unexpected verdict: {other:?}"),
        }
    }
    panic!("classifier never reached the lowered-arms warning");
}

#[test]
fn zero_dt_frames_change_nothing() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(2);

    let left = shaking(0, lowered(Chirality::Left));
    let right = resting(lowered(Chirality::Right));
    for frame in 0..10 {
        let left = shaking(frame, lowered(Chirality::Left));
        let _ = classifier.update(Some(&left), Some(&right), DT);
    }

    let counts_before = (
        classifier.left().tremble_count(),
        classifier.right().tremble_count(),
    );
    let time_before = classifier.time_remaining();

    for _ in 0..2 {
        assert_eq!(
            classifier.update(Some(&left), Some(&right), 0.0),
            Verdict::Collecting
        );
    }

    assert_eq!(
        counts_before,
        (
            classifier.left().tremble_count(),
            classifier.right().tremble_count()
        )
    );
    assert_eq!(time_before, classifier.time_remaining());
}

#[test]
fn manual_bind_locks_and_restarts_evidence() {
    let mut classifier = ArmBindingClassifier::new(ClassifierCfg::default());
    classifier.begin(2);

    for frame in 0..10 {
        let left = shaking(frame, lowered(Chirality::Left));
        let right = resting(lowered(Chirality::Right));
        let _ = classifier.update(Some(&left), Some(&right), DT);
    }

    assert!(classifier.manual_bind(Chirality::Left));
    assert!(classifier.chirality_locked());
    assert_eq!(classifier.left().tremble_count(), 0);
    assert_eq!(classifier.right().tremble_count(), 0);

    // A second press no longer resets anything but still reports the swap.
    assert!(!classifier.manual_bind(Chirality::Right));
}
