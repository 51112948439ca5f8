//! Tests for learning rate schedulers

use super::*;
use approx::assert_abs_diff_eq;
use proptest::prelude::*;

#[test]
fn test_multi_step_reference_schedule() {
    let mut scheduler = MultiStepLR::new(0.1, vec![12, 22], 0.1);
    let lrs: Vec<f64> = (0..27)
        .map(|_| {
            let lr = scheduler.get_lr();
            scheduler.step();
            lr
        })
        .collect();

    for lr in &lrs[..12] {
        assert_abs_diff_eq!(*lr, 0.1, epsilon = 1e-12);
    }
    for lr in &lrs[12..22] {
        assert_abs_diff_eq!(*lr, 0.01, epsilon = 1e-12);
    }
    for lr in &lrs[22..] {
        assert_abs_diff_eq!(*lr, 0.001, epsilon = 1e-12);
    }
}

#[test]
fn test_multi_step_set_epoch() {
    let mut scheduler = MultiStepLR::new(0.1, vec![12, 22], 0.1);
    scheduler.set_epoch(22);
    assert_abs_diff_eq!(scheduler.get_lr(), 0.001, epsilon = 1e-12);
    scheduler.set_epoch(11);
    assert_abs_diff_eq!(scheduler.get_lr(), 0.1, epsilon = 1e-12);
}

#[test]
fn test_multi_step_no_milestones() {
    let mut scheduler = MultiStepLR::new(0.05, vec![], 0.1);
    scheduler.set_epoch(100);
    assert_abs_diff_eq!(scheduler.get_lr(), 0.05, epsilon = 1e-12);
}

#[test]
fn test_step_decay_basic() {
    let mut scheduler = StepDecayLR::new(1.0, 10, 0.5);
    assert_abs_diff_eq!(scheduler.get_lr(), 1.0, epsilon = 1e-12);
    for _ in 0..10 {
        scheduler.step();
    }
    assert_abs_diff_eq!(scheduler.get_lr(), 0.5, epsilon = 1e-12);
    for _ in 0..10 {
        scheduler.step();
    }
    assert_abs_diff_eq!(scheduler.get_lr(), 0.25, epsilon = 1e-12);
}

#[test]
fn test_step_decay_zero_step_size() {
    let mut scheduler = StepDecayLR::new(1.0, 0, 0.5);
    scheduler.step();
    assert_abs_diff_eq!(scheduler.get_lr(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_constant() {
    let mut scheduler = ConstantLR::new(0.3);
    scheduler.step();
    scheduler.set_epoch(40);
    assert_abs_diff_eq!(scheduler.get_lr(), 0.3, epsilon = 1e-12);
}

#[test]
fn test_build_scheduler_default() {
    let mut scheduler = build_scheduler(&SchedulerSpec::default(), 0.1);
    scheduler.set_epoch(12);
    assert_abs_diff_eq!(scheduler.get_lr(), 0.01, epsilon = 1e-12);
}

proptest! {
    #[test]
    fn prop_multi_step_is_non_increasing(
        lr in 1e-4f64..1.0,
        gamma in 0.01f64..1.0,
        first in 1usize..20,
        gap in 1usize..20,
    ) {
        let mut scheduler = MultiStepLR::new(lr, vec![first, first + gap], gamma);
        let mut prev = scheduler.get_lr();
        for _ in 0..50 {
            scheduler.step();
            let next = scheduler.get_lr();
            prop_assert!(next <= prev + 1e-15);
            prev = next;
        }
    }
}
