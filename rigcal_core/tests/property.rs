use nalgebra::{Quaternion, UnitQuaternion, Vector3};
use proptest::prelude::*;
use rigcal_core::{ArmBindingAccumulator, ArmBindingClassifier, ClassifierCfg, HoldLatch};
use rigcal_traits::{Chirality, NodeSample};

fn arb_sample() -> impl Strategy<Value = NodeSample> {
    (
        -30.0f32..30.0,
        -30.0f32..30.0,
        -30.0f32..30.0,
        -1.0f32..1.0,
        -1.0f32..1.0,
        -1.0f32..1.0,
        0.1f32..1.0,
    )
        .prop_map(|(ax, ay, az, qi, qj, qk, qw)| {
            let orientation = UnitQuaternion::from_quaternion(Quaternion::new(qw, qi, qj, qk));
            NodeSample::new(Vector3::new(ax, ay, az), orientation)
        })
}

proptest! {
    #[test]
    fn reset_neutralizes_every_predicate(
        samples in prop::collection::vec(arb_sample(), 0..200),
    ) {
        let cfg = ClassifierCfg::default();
        let mut acc = ArmBindingAccumulator::default();
        for sample in &samples {
            acc.ingest(sample, Chirality::Left, &cfg);
        }
        acc.reset();
        prop_assert_eq!(acc.tremble_count(), 0);
        prop_assert!(!acc.direction_pass(&cfg));
        prop_assert!(!acc.revert_orientation(&cfg));
    }

    #[test]
    fn tremble_count_never_decreases(
        samples in prop::collection::vec(arb_sample(), 1..200),
    ) {
        let cfg = ClassifierCfg::default();
        let mut acc = ArmBindingAccumulator::default();
        let mut last = 0;
        for sample in &samples {
            acc.ingest(sample, Chirality::Right, &cfg);
            prop_assert!(acc.tremble_count() >= last);
            last = acc.tremble_count();
        }
    }

    #[test]
    fn classifier_survives_arbitrary_streams(
        samples in prop::collection::vec((arb_sample(), arb_sample()), 1..300),
        dt in 0.0f32..0.1,
    ) {
        let cfg = ClassifierCfg::default();
        let ceiling = cfg.shake_window_s + cfg.warn_window_s + 1e-3;
        let mut classifier = ArmBindingClassifier::new(cfg);
        classifier.begin(2);

        for (left, right) in &samples {
            let _ = classifier.update(Some(left), Some(right), dt);
            // The countdown only ever counts down or reseeds to a full window.
            prop_assert!(classifier.time_remaining() <= ceiling);
        }
    }

    #[test]
    fn latch_release_always_wins(went_down: bool, may_arm: bool) {
        let mut latch = HoldLatch::Armed;
        latch.update(went_down, true, may_arm);
        prop_assert_eq!(latch, HoldLatch::Idle);
    }

    #[test]
    fn latch_never_arms_without_permission(
        downs in prop::collection::vec(any::<bool>(), 1..50),
    ) {
        let mut latch = HoldLatch::default();
        for went_down in downs {
            latch.update(went_down, false, false);
            prop_assert!(!latch.is_armed());
        }
    }
}
