//! Shared fixtures for task board unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

use crate::task::{
    adapters::{InMemoryTaskStorage, SequentialIdGenerator},
    domain::{PersistedTaskData, StatusName, StatusWorkflow, Task, TaskId, TaskPriority},
    services::TaskStore,
};

/// Clock that only moves when told to.
#[derive(Debug)]
pub(super) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(super) const fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(super) fn advance(&self, step: Duration) {
        let mut now = self.now.lock().expect("clock lock");
        *now += step;
    }

    pub(super) fn set(&self, value: DateTime<Utc>) {
        *self.now.lock().expect("clock lock") = value;
    }
}

impl Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().expect("clock lock")
    }
}

pub(super) type TestStore = TaskStore<InMemoryTaskStorage, ManualClock, SequentialIdGenerator>;

pub(super) fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
pub(super) fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::at(epoch()))
}

pub(super) fn id(value: u128) -> TaskId {
    TaskId::from_uuid(uuid::Uuid::from_u128(value))
}

/// Builds a stored task directly, bypassing creation rules.
pub(super) fn stored_task(value: u128, title: &str, status: &str) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: id(value),
        title: title.to_owned(),
        description: String::new(),
        status: StatusName::new(status),
        priority: TaskPriority::Important,
        due_date: None,
        created_at: epoch(),
        updated_at: epoch(),
    })
}

pub(super) fn store_over(storage: &InMemoryTaskStorage, clock: Arc<ManualClock>) -> TestStore {
    TaskStore::open(
        storage.clone(),
        clock,
        SequentialIdGenerator::starting_at(100),
        StatusWorkflow::default(),
    )
}
