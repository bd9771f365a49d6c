/*!
 * Signal Controller Integration Tests
 *
 * Cycling order, blocking waits, and stop broadcasts across threads
 */

use intersection_signal::{GreenWait, HoldOutcome, Road, SignalController};
use proptest::prelude::*;
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn wait_for_waiters(controller: &SignalController, n: usize) {
    let start = Instant::now();
    while controller.waiting() < n {
        assert!(
            start.elapsed() < Duration::from_secs(5),
            "expected {n} waiters, saw {}",
            controller.waiting()
        );
        thread::sleep(Duration::from_millis(1));
    }
}

#[test]
fn test_full_cycle_returns_to_north() {
    let controller = SignalController::new();
    let seen: Vec<Road> = (0..3).map(|_| controller.advance()).collect();
    assert_eq!(seen, vec![Road::East, Road::South, Road::West]);
    assert_eq!(controller.advance(), Road::North);
}

#[test]
fn test_east_waiter_released_by_one_advance() {
    let controller = Arc::new(SignalController::new());
    let controller_clone = controller.clone();

    let handle = thread::spawn(move || {
        let start = Instant::now();
        (controller_clone.wait_for_green(Road::East), start.elapsed())
    });

    wait_for_waiters(&controller, 1);
    assert_eq!(controller.advance(), Road::East);

    let (outcome, elapsed) = handle.join().unwrap();
    assert_eq!(outcome, GreenWait::Granted);
    assert!(elapsed < Duration::from_secs(5));
    assert_eq!(controller.waiting(), 0);
}

#[test]
fn test_every_waiter_wakes_on_its_own_turn() {
    let controller = Arc::new(SignalController::new());
    let (tx, rx) = mpsc::channel();

    let handles: Vec<_> = [Road::East, Road::South, Road::West]
        .into_iter()
        .map(|road| {
            let controller = controller.clone();
            let tx = tx.clone();
            thread::spawn(move || {
                let outcome = controller.wait_for_green(road);
                // Nobody advances until this report is received
                tx.send((road, outcome, controller.current_green())).unwrap();
            })
        })
        .collect();

    wait_for_waiters(&controller, 3);

    for expected in [Road::East, Road::South, Road::West] {
        assert_eq!(controller.advance(), expected);
        let (road, outcome, green_at_return) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(road, expected);
        assert_eq!(outcome, GreenWait::Granted);
        assert_eq!(green_at_return, expected);
    }

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_stop_releases_all_waiters_without_green() {
    let controller = Arc::new(SignalController::new());

    let handles: Vec<_> = [Road::East, Road::South, Road::West]
        .into_iter()
        .map(|road| {
            let controller = controller.clone();
            thread::spawn(move || controller.wait_for_green(road))
        })
        .collect();

    wait_for_waiters(&controller, 3);
    controller.stop();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), GreenWait::Stopped);
    }
    assert_eq!(controller.current_green(), Road::North);
    assert_eq!(controller.stats().advances, 0);
    assert_eq!(controller.waiting(), 0);
}

#[test]
fn test_stop_interrupts_hold_and_blocks_handoff() {
    let controller = Arc::new(SignalController::new());
    let controller_clone = controller.clone();

    let holder = thread::spawn(move || {
        let outcome = controller_clone.hold(Duration::from_secs(30));
        let handed_to = controller_clone.advance_if_green(Road::North);
        (outcome, handed_to)
    });

    thread::sleep(Duration::from_millis(30));
    controller.stop();

    let (outcome, handed_to) = holder.join().unwrap();
    assert_eq!(outcome, HoldOutcome::Interrupted);
    assert_eq!(handed_to, None);
    assert_eq!(controller.current_green(), Road::North);
}

#[test]
fn test_concurrent_advances_are_serialized() {
    let controller = Arc::new(SignalController::new());
    let threads = 8;
    let per_thread = 250;

    let handles: Vec<_> = (0..threads)
        .map(|_| {
            let controller = controller.clone();
            thread::spawn(move || {
                for _ in 0..per_thread {
                    controller.advance();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let total = threads * per_thread;
    assert_eq!(controller.stats().advances, total as u64);
    assert_eq!(controller.current_green(), Road::from_index(total));
}

proptest! {
    #[test]
    fn prop_advances_follow_cyclic_order(n in 0usize..64) {
        let controller = SignalController::new();
        let mut previous = controller.current_green();

        for _ in 0..n {
            let next = controller.advance();
            prop_assert_eq!(next, previous.next());
            prop_assert_ne!(next, previous);
            previous = next;
        }

        prop_assert_eq!(controller.current_green(), Road::from_index(n));
    }

    #[test]
    fn prop_exactly_one_road_green(n in 0usize..32) {
        let controller = SignalController::new();
        for _ in 0..n {
            controller.advance();
        }
        let green: Vec<_> = Road::ALL
            .into_iter()
            .filter(|road| controller.is_green(*road))
            .collect();
        prop_assert_eq!(green.len(), 1);
        prop_assert_eq!(green[0], controller.current_green());
    }
}
