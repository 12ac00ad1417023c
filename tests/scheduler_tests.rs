#![allow(missing_docs)]

use birdbrain::simulation::scheduler::{ScheduleMode, TickScheduler};
use std::time::{Duration, Instant};

fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

#[test]
fn test_stopped_scheduler_never_fires() {
    let mut scheduler = TickScheduler::new(10.0, ScheduleMode::RealTime, 8);
    assert!(!scheduler.is_running());
    assert_eq!(scheduler.due_ticks(Instant::now() + ms(10_000)), 0);
}

#[test]
fn test_real_time_fires_once_per_interval() {
    let mut scheduler = TickScheduler::new(10.0, ScheduleMode::RealTime, 8);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert_eq!(scheduler.interval(), ms(100));
    assert_eq!(scheduler.due_ticks(t0 + ms(50)), 0);
    assert_eq!(scheduler.due_ticks(t0 + ms(150)), 1);
    // the remainder of the interval carries over
    assert_eq!(scheduler.due_ticks(t0 + ms(250)), 1);
    assert_eq!(scheduler.due_ticks(t0 + ms(550)), 3);
    assert_eq!(scheduler.due_ticks(t0 + ms(560)), 0);
}

#[test]
fn test_batch_multiplies_ticks_per_firing() {
    let mut scheduler = TickScheduler::new(10.0, ScheduleMode::Batch { ticks_per_fire: 1000 }, 8);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert_eq!(scheduler.due_ticks(t0 + ms(150)), 1000);
    assert_eq!(scheduler.due_ticks(t0 + ms(250)), 1000);
}

#[test]
fn test_batch_never_catches_up_more_than_one_firing() {
    let mut scheduler = TickScheduler::new(10.0, ScheduleMode::Batch { ticks_per_fire: 1000 }, 8);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert_eq!(scheduler.due_ticks(t0 + ms(750)), 1000);
    // the stalled firings are dropped
    assert_eq!(scheduler.due_ticks(t0 + ms(760)), 0);
    assert_eq!(scheduler.due_ticks(t0 + ms(860)), 1000);
}

#[test]
fn test_backlog_is_capped() {
    let mut scheduler = TickScheduler::new(10.0, ScheduleMode::RealTime, 3);
    let t0 = Instant::now();
    scheduler.start(t0);

    assert_eq!(scheduler.due_ticks(t0 + ms(2_050)), 3);
    // the dropped backlog is not replayed
    assert_eq!(scheduler.due_ticks(t0 + ms(2_050)), 0);
    assert_eq!(scheduler.due_ticks(t0 + ms(2_160)), 1);
}

#[test]
fn test_stop_discards_pending_firings() {
    let mut scheduler = TickScheduler::new(10.0, ScheduleMode::RealTime, 8);
    let t0 = Instant::now();
    scheduler.start(t0);
    scheduler.stop();

    assert!(!scheduler.is_running());
    assert_eq!(scheduler.due_ticks(t0 + ms(500)), 0);
}

#[test]
fn test_restart_cancels_previous_schedule() {
    let mut scheduler = TickScheduler::new(10.0, ScheduleMode::RealTime, 8);
    let t0 = Instant::now();
    scheduler.start(t0);
    scheduler.start(t0 + ms(1_000));

    // nothing from the first schedule is due
    assert_eq!(scheduler.due_ticks(t0 + ms(1_050)), 0);
    assert_eq!(scheduler.due_ticks(t0 + ms(1_150)), 1);
}
