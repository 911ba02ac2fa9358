/*!
 * Contention Harness Integration Tests
 *
 * Counter correctness, determinism and failure handling across task modes
 */

use lock_contention::core::sync::{Access, ExclusiveLock, LockKind, SectionProbe};
use lock_contention::harness::{ContentionHarness, HarnessConfig, Scenario, ScenarioMatrix};
use lock_contention::HarnessError;
use proptest::prelude::*;
use std::time::{Duration, Instant};

fn harnesses() -> Vec<ContentionHarness> {
    vec![
        ContentionHarness::new(HarnessConfig::pooled(4)).unwrap(),
        ContentionHarness::new(HarnessConfig::dedicated()).unwrap(),
    ]
}

#[test]
fn test_balanced_scenario_is_deterministic() {
    for harness in harnesses() {
        for kind in LockKind::ALL {
            for _ in 0..5 {
                let report = harness
                    .run_kind(kind, &Scenario::new("balanced", 50, 50, 1))
                    .unwrap();
                assert_eq!(report.final_count, 50, "{} in {:?}", kind, harness.config());
            }
        }
    }
}

#[test]
fn test_repetitions_accumulate_on_one_counter() {
    let harness = ContentionHarness::new(HarnessConfig::pooled(4)).unwrap();

    let report = harness
        .run_kind(LockKind::ReadWrite, &Scenario::new("acc", 30, 20, 4))
        .unwrap();

    assert_eq!(report.samples.len(), 4);
    assert_eq!(report.final_count, 80);
    assert!(report.is_consistent());
    for (i, sample) in report.samples.iter().enumerate() {
        assert_eq!(sample.index, i);
        assert_eq!(sample.tasks(), 50);
    }
}

#[test]
fn test_repetition_timing_covers_task_completion() {
    struct SlowWrites;
    impl SectionProbe for SlowWrites {
        fn enter(&self, access: Access) {
            if access == Access::Write {
                std::thread::sleep(Duration::from_millis(2));
            }
        }
        fn exit(&self, _access: Access, _value: u64) {}
    }

    let harness = ContentionHarness::new(HarnessConfig::pooled(4)).unwrap();
    let lock = ExclusiveLock::with_probe(SlowWrites);

    let started = Instant::now();
    let elapsed = harness.run_repetition(&lock, 0, 10).unwrap();

    // Ten serialized 2ms writes cannot finish in under 20ms
    assert!(elapsed >= Duration::from_millis(20), "{:?}", elapsed);
    assert!(elapsed <= started.elapsed());
}

#[test]
fn test_panicking_task_fails_the_run() {
    struct ExplodingWrites;
    impl SectionProbe for ExplodingWrites {
        fn enter(&self, access: Access) {
            if access == Access::Write {
                panic!("write probe exploded");
            }
        }
        fn exit(&self, _access: Access, _value: u64) {}
    }

    for harness in harnesses() {
        let lock = ExclusiveLock::with_probe(ExplodingWrites);
        let err = harness
            .run(&lock, &Scenario::new("doomed", 20, 3, 1))
            .unwrap_err();

        match err {
            HarnessError::TaskPanicked {
                repetition,
                message,
            } => {
                assert_eq!(repetition, 0);
                assert!(message.contains("write probe exploded"), "{}", message);
            }
            other => panic!("expected TaskPanicked, got {:?}", other),
        }
    }
}

#[test]
fn test_standard_matrix_small_scale() {
    let harness = ContentionHarness::new(HarnessConfig::pooled(4)).unwrap();
    let matrix = ScenarioMatrix::standard(1, 2);

    let reports = harness.run_matrix(&matrix).unwrap();

    assert_eq!(reports.len(), matrix.len());
    for report in &reports {
        assert!(report.is_consistent(), "{}", report.summary_line());
        assert_eq!(report.samples.len(), 2);
        assert!(report.ops_per_sec() > 0.0);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_no_lost_updates(
        reads in 0usize..300,
        writes in 0usize..300,
        repetitions in 1usize..3,
        rw in any::<bool>(),
    ) {
        let kind = if rw { LockKind::ReadWrite } else { LockKind::Exclusive };
        let harness = ContentionHarness::new(HarnessConfig::pooled(4)).unwrap();

        let report = harness
            .run_kind(kind, &Scenario::new("prop", reads, writes, repetitions))
            .unwrap();

        prop_assert_eq!(report.final_count, (writes * repetitions) as u64);
        prop_assert_eq!(report.samples.len(), repetitions);
    }
}
