//! Fixtures shared by unit tests across contexts.

use crate::task::domain::TaskId;
use crate::tracking::{
    domain::{PeriodChanges, PeriodSummary},
    ports::{PurgedTask, TrackingRepositoryError, TrackingRepositoryResult, TrackingUnitOfWork},
};
use async_trait::async_trait;
use chrono::{DateTime, Local, NaiveDate, Utc};
use mockable::MockClock;
use mockall::mock;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Builds a mock clock that always reads noon UTC on `date`.
pub fn clock_on(date: NaiveDate) -> MockClock {
    let now = noon(date);
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(now);
    clock.expect_local().return_const(now.with_timezone(&Local));
    clock
}

/// Shared time source for mock clocks that a test moves mid-scenario.
#[derive(Debug, Clone)]
pub struct ClockHand(Arc<AtomicI64>);

impl ClockHand {
    /// Points the hand at noon UTC on `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self(Arc::new(AtomicI64::new(noon(date).timestamp())))
    }

    /// Moves the hand to noon UTC on `date`.
    pub fn set(&self, date: NaiveDate) {
        self.0.store(noon(date).timestamp(), Ordering::SeqCst);
    }

    /// Builds a mock clock that reads the hand on every call.
    pub fn clock(&self) -> MockClock {
        let utc_hand = Arc::clone(&self.0);
        let local_hand = Arc::clone(&self.0);
        let mut clock = MockClock::new();
        clock.expect_utc().returning(move || read(&utc_hand));
        clock
            .expect_local()
            .returning(move || read(&local_hand).with_timezone(&Local));
        clock
    }
}

/// Builds a date, panicking on invalid input.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

fn noon(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(12, 0, 0)
        .expect("noon exists on every date")
        .and_utc()
}

fn read(hand: &AtomicI64) -> DateTime<Utc> {
    DateTime::from_timestamp(hand.load(Ordering::SeqCst), 0)
        .expect("clock hand holds a valid timestamp")
}

mock! {
    /// Unit of work whose outcomes each test scripts.
    pub UnitOfWork {}

    #[async_trait]
    impl TrackingUnitOfWork for UnitOfWork {
        async fn commit_period(
            &self,
            changes: &PeriodChanges,
            summary: &PeriodSummary,
        ) -> TrackingRepositoryResult<()>;
        async fn purge_task(&self, task_id: TaskId) -> TrackingRepositoryResult<Option<PurgedTask>>;
    }
}

/// A repository failure standing in for a lost connection.
pub fn store_offline() -> TrackingRepositoryError {
    TrackingRepositoryError::persistence(std::io::Error::other("store offline"))
}
