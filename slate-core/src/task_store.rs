//! TaskStore: insertion-ordered task collection keyed by id.
//!
//! Design:
//! - Canonical tasks live in a Vec in the order they were added.
//! - An id -> position map gives O(1) duplicate checks and lookups.
//! - Sorted views are produced on demand with a stable sort, so ties keep
//!   insertion order. The store itself is never reordered.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deadline_index::DeadlineIndex;
use crate::error::{PlanError, PlanResult};
use crate::task::Task;

/// Ordering criterion for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Earliest deadline first.
    #[default]
    Deadline,
    /// Highest priority first.
    Priority,
    /// Category label, A to Z.
    #[serde(alias = "type")]
    Category,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Deadline => "deadline",
            SortKey::Priority => "priority",
            SortKey::Category => "category",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "deadline" => Ok(SortKey::Deadline),
            "priority" => Ok(SortKey::Priority),
            "category" | "type" => Ok(SortKey::Category),
            other => Err(format!(
                "unknown sort key '{other}' (expected deadline, priority or category)"
            )),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    by_id: HashMap<u64, usize>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.by_id.contains_key(&id)
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.by_id.get(&id).map(|&pos| &self.tasks[pos])
    }

    /// Append a task. Fails without touching the store if the id is taken.
    pub fn add(&mut self, task: Task) -> PlanResult<&Task> {
        if self.by_id.contains_key(&task.id()) {
            return Err(PlanError::DuplicateId(task.id()));
        }

        let pos = self.tasks.len();
        self.by_id.insert(task.id(), pos);
        self.tasks.push(task);
        debug!(id = self.tasks[pos].id(), count = self.tasks.len(), "task added");
        Ok(&self.tasks[pos])
    }

    /// All tasks in insertion order.
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Largest id in the store, if any.
    pub fn max_id(&self) -> Option<u64> {
        self.by_id.keys().copied().max()
    }

    pub fn sorted_by(&self, key: SortKey) -> Vec<&Task> {
        match key {
            SortKey::Deadline => self.deadline_index().into_ordered(),
            SortKey::Priority => {
                let mut out: Vec<&Task> = self.tasks.iter().collect();
                // priority desc; sort_by is stable
                out.sort_by(|a, b| b.priority().cmp(&a.priority()));
                out
            }
            SortKey::Category => {
                let mut out: Vec<&Task> = self.tasks.iter().collect();
                out.sort_by(|a, b| a.category().cmp(b.category()));
                out
            }
        }
    }

    /// Deadline-ascending view over the current contents.
    pub fn deadline_index(&self) -> DeadlineIndex<'_> {
        DeadlineIndex::build(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::NewTask;

    fn task(id: i64, deadline: &str, priority: i32, category: &str) -> Task {
        NewTask::new(id, format!("task {id}"), deadline)
            .with_priority(priority)
            .with_category(category)
            .into_task()
            .unwrap()
    }

    fn ids(tasks: &[&Task]) -> Vec<u64> {
        tasks.iter().map(|t| t.id()).collect()
    }

    fn sample() -> TaskStore {
        let mut s = TaskStore::new();
        s.add(task(1, "2023-11-15 16:00", 10, "academic")).unwrap();
        s.add(task(2, "2023-11-15 10:00", 8, "personal")).unwrap();
        s.add(task(3, "2023-11-16 14:00", 9, "academic")).unwrap();
        s.add(task(4, "2023-11-15 18:00", 5, "personal")).unwrap();
        s
    }

    #[test]
    fn keeps_insertion_order() {
        let s = sample();
        let all: Vec<u64> = s.all().iter().map(Task::id).collect();
        assert_eq!(all, vec![1, 2, 3, 4]);
        assert_eq!(s.len(), 4);
        assert_eq!(s.get(3).unwrap().priority(), 9);
        assert!(s.get(9).is_none());
        assert_eq!(s.max_id(), Some(4));
    }

    #[test]
    fn duplicate_id_leaves_store_unchanged() {
        let mut s = sample();
        let err = s.add(task(2, "2024-01-01 09:00", 1, "other")).unwrap_err();
        assert_eq!(err, PlanError::DuplicateId(2));
        assert_eq!(s.len(), 4);
        assert_eq!(s.get(2).unwrap().description(), "task 2");
        assert_eq!(s.get(2).unwrap().priority(), 8);
    }

    #[test]
    fn sorts_by_each_key() {
        let s = sample();
        assert_eq!(ids(&s.sorted_by(SortKey::Deadline)), vec![2, 1, 4, 3]);
        assert_eq!(ids(&s.sorted_by(SortKey::Priority)), vec![1, 3, 2, 4]);
        assert_eq!(ids(&s.sorted_by(SortKey::Category)), vec![1, 3, 2, 4]);
        // views never reorder the store
        let all: Vec<u64> = s.all().iter().map(Task::id).collect();
        assert_eq!(all, vec![1, 2, 3, 4]);
    }

    #[test]
    fn ties_keep_insertion_order() {
        let mut s = TaskStore::new();
        s.add(task(7, "2023-11-15 10:00", 5, "work")).unwrap();
        s.add(task(3, "2023-11-15 10:00", 5, "work")).unwrap();
        s.add(task(5, "2023-11-15 10:00", 5, "work")).unwrap();

        for key in [SortKey::Deadline, SortKey::Priority, SortKey::Category] {
            assert_eq!(ids(&s.sorted_by(key)), vec![7, 3, 5], "key {key}");
        }
    }

    #[test]
    fn parses_sort_keys() {
        assert_eq!("deadline".parse::<SortKey>().unwrap(), SortKey::Deadline);
        assert_eq!(" Priority ".parse::<SortKey>().unwrap(), SortKey::Priority);
        assert_eq!("type".parse::<SortKey>().unwrap(), SortKey::Category);
        assert!("urgency".parse::<SortKey>().is_err());
    }
}
