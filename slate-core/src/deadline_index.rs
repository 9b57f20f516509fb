//! Deadline index: tasks sorted ascending by deadline, with lookup by day.
//!
//! The index borrows from the store and is rebuilt on every request, so it
//! always reflects the store's current contents.
//!
//! Lookup by date:
//! - binary-search on the date portion of each deadline for any hit
//! - widen the hit left and right while the date still matches
//!
//! Same-date entries are contiguous because a date is a coarsening of the
//! full timestamp ordering.

use chrono::NaiveDate;
use tracing::debug;

use crate::task::Task;

#[derive(Debug, Clone)]
pub struct DeadlineIndex<'a> {
    sorted: Vec<&'a Task>,
}

impl<'a> DeadlineIndex<'a> {
    /// Stable sort, so tasks sharing a deadline keep their input order.
    pub fn build(tasks: &'a [Task]) -> Self {
        let mut sorted: Vec<&Task> = tasks.iter().collect();
        sorted.sort_by_key(|t| t.deadline());
        Self { sorted }
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn ordered(&self) -> &[&'a Task] {
        &self.sorted
    }

    pub fn into_ordered(self) -> Vec<&'a Task> {
        self.sorted
    }

    /// Every task due on `date`, in deadline order. Empty when none match.
    pub fn range_by_date(&self, date: NaiveDate) -> Vec<&'a Task> {
        let Ok(hit) = self
            .sorted
            .binary_search_by(|t| t.due_date().cmp(&date))
        else {
            debug!(%date, "no tasks due");
            return Vec::new();
        };

        let mut start = hit;
        while start > 0 && self.sorted[start - 1].due_date() == date {
            start -= 1;
        }

        let mut end = hit + 1;
        while end < self.sorted.len() && self.sorted[end].due_date() == date {
            end += 1;
        }

        debug!(%date, matches = end - start, "tasks due");
        self.sorted[start..end].to_vec()
    }
}
