use super::*;

#[test]
fn test_profile_limits() {
    assert_eq!(RecursionProfile::SubtypeCheck.max_depth(), 100);
    assert_eq!(RecursionProfile::SubtypeCheck.max_iterations(), 100_000);
    assert_eq!(RecursionProfile::MismatchExplain.max_depth(), 20);
    let custom = RecursionProfile::Custom {
        max_depth: 3,
        max_iterations: 7,
    };
    assert_eq!(custom.max_depth(), 3);
    assert_eq!(custom.max_iterations(), 7);
}

#[test]
fn test_guard_detects_cycle() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(10, 100);
    assert_eq!(guard.enter(1), RecursionResult::Entered);
    assert_eq!(guard.enter(2), RecursionResult::Entered);
    assert!(guard.enter(1).is_cycle());
    assert!(guard.is_visiting(&2));
    guard.leave(2);
    guard.leave(1);
    assert_eq!(guard.depth(), 0);
    assert!(!guard.is_exceeded());
}

#[test]
fn test_guard_depth_limit_is_sticky() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(2, 100);
    assert!(guard.enter(1).is_entered());
    assert!(guard.enter(2).is_entered());
    assert_eq!(guard.enter(3), RecursionResult::DepthExceeded);
    guard.leave(2);
    guard.leave(1);
    assert!(guard.is_exceeded());
    guard.reset();
    assert!(!guard.is_exceeded());
}

#[test]
fn test_guard_iteration_limit() {
    let mut guard: RecursionGuard<u32> = RecursionGuard::new(10, 3);
    for key in 0..3 {
        assert!(guard.enter(key).is_entered());
        guard.leave(key);
    }
    assert!(guard.enter(99).is_exceeded());
    assert_eq!(guard.iterations(), 4);
}

#[test]
fn test_depth_counter() {
    let mut counter = DepthCounter::new(2);
    assert!(counter.enter());
    assert!(counter.enter());
    assert!(!counter.enter());
    assert!(counter.is_exceeded());
    counter.leave();
    counter.leave();
    assert_eq!(counter.depth(), 0);
}
