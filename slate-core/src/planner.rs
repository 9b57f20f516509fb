//! Planner: the caller-facing entry points.
//!
//! A `Planner` owns one [`TaskStore`] and one [`ScheduleOptimizer`]. Callers
//! create and hold their own instance; there is no shared global scheduler.
//! Adding needs `&mut self`, so no view or optimization can observe a store
//! that changes underneath it.

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::PlanResult;
use crate::optimizer::{ScheduleOptimizer, Selection};
use crate::task::{NewTask, Task};
use crate::task_store::{SortKey, TaskStore};
use crate::timeline::{self, TimelineBar};

#[derive(Debug, Clone, Default)]
pub struct Planner {
    store: TaskStore,
    optimizer: ScheduleOptimizer,
}

impl Planner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_optimizer(optimizer: ScheduleOptimizer) -> Self {
        Self {
            store: TaskStore::new(),
            optimizer,
        }
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn optimizer(&self) -> &ScheduleOptimizer {
        &self.optimizer
    }

    /// Validate raw fields and insert the task. Nothing is added on error.
    pub fn add_task(&mut self, new: NewTask) -> PlanResult<&Task> {
        let task = new.into_task()?;
        self.store.add(task)
    }

    /// Next free id for callers that number tasks automatically.
    pub fn next_id(&self) -> u64 {
        self.store.max_id().map_or(1, |id| id + 1)
    }

    pub fn list_tasks(&self, key: SortKey) -> Vec<&Task> {
        self.store.sorted_by(key)
    }

    pub fn find_by_date(&self, date: NaiveDate) -> Vec<&Task> {
        self.store.deadline_index().range_by_date(date)
    }

    /// Rows are taken in insertion order.
    pub fn optimize_schedule(&self, budget_minutes: i64) -> PlanResult<Selection<'_>> {
        debug!(budget_minutes, tasks = self.store.len(), "optimizing schedule");
        self.optimizer.optimize(self.store.all(), budget_minutes)
    }

    /// Bars for every task, in insertion order.
    pub fn timeline(&self, origin: NaiveDateTime) -> Vec<TimelineBar<'_>> {
        timeline::bars(self.store.all(), origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlanError, ValidationError};

    #[test]
    fn add_task_validates_before_inserting() {
        let mut p = Planner::new();
        let err = p
            .add_task(NewTask::new(1, "Exercise", "2023-11-15 18:00").with_duration(0))
            .unwrap_err();
        assert_eq!(err, PlanError::Validation(ValidationError::NonPositiveDuration(0)));
        assert!(p.store().is_empty());
    }

    #[test]
    fn next_id_follows_largest_id() {
        let mut p = Planner::new();
        assert_eq!(p.next_id(), 1);
        p.add_task(NewTask::new(7, "a", "2023-11-15 18:00")).unwrap();
        p.add_task(NewTask::new(3, "b", "2023-11-15 19:00")).unwrap();
        assert_eq!(p.next_id(), 8);
    }

    #[test]
    fn optimize_uses_configured_cap() {
        let mut p = Planner::with_optimizer(ScheduleOptimizer::new(60));
        p.add_task(NewTask::new(1, "a", "2023-11-15 18:00").with_priority(3))
            .unwrap();
        assert!(matches!(
            p.optimize_schedule(61),
            Err(PlanError::BudgetTooLarge { max: 60, .. })
        ));
        assert_eq!(p.optimize_schedule(30).unwrap().ids(), vec![1]);
    }
}
