//! Schedule optimizer: pick the subset of tasks with the highest total
//! priority that fits in a time budget.
//!
//! This is 0/1 knapsack with weight = duration, value = priority and
//! capacity = budget minutes, solved exactly with a DP table of
//! `(n + 1) x (budget + 1)` cells:
//!
//! - `best[0][t] = 0`
//! - `best[i][t] = best[i-1][t]` when task i is longer than `t`
//! - otherwise `max(best[i-1][t], best[i-1][t-d] + p)`
//!
//! Selection is recovered by walking rows from `n` down to `1`: task i is in
//! the answer iff `best[i][t] != best[i-1][t]`. Rows follow the order of the
//! candidate slice, which fixes the tie-break between equally good subsets.
//!
//! Time and space are O(n * budget). The budget is capped so a typo cannot
//! allocate an unbounded table.

use serde::Serialize;
use tracing::debug;

use crate::error::{PlanError, PlanResult};
use crate::task::Task;

/// One week.
pub const DEFAULT_MAX_BUDGET_MINUTES: u32 = 7 * 24 * 60;

/// Chosen tasks plus their totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection<'a> {
    /// In candidate order.
    pub tasks: Vec<&'a Task>,
    pub total_priority: i64,
    pub total_minutes: u64,
    pub budget_minutes: u32,
}

impl<'a> Selection<'a> {
    fn empty(budget_minutes: u32) -> Self {
        Self {
            tasks: Vec::new(),
            total_priority: 0,
            total_minutes: 0,
            budget_minutes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn ids(&self) -> Vec<u64> {
        self.tasks.iter().map(|t| t.id()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleOptimizer {
    max_budget_minutes: u32,
}

impl Default for ScheduleOptimizer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_BUDGET_MINUTES)
    }
}

impl ScheduleOptimizer {
    pub fn new(max_budget_minutes: u32) -> Self {
        Self { max_budget_minutes }
    }

    pub fn max_budget_minutes(&self) -> u32 {
        self.max_budget_minutes
    }

    /// Validate the requested budget against the cap.
    fn check_budget(&self, budget_minutes: i64) -> PlanResult<u32> {
        if budget_minutes < 0 {
            return Err(PlanError::InvalidBudget(budget_minutes));
        }
        u32::try_from(budget_minutes)
            .ok()
            .filter(|b| *b <= self.max_budget_minutes)
            .ok_or(PlanError::BudgetTooLarge {
                requested: budget_minutes,
                max: self.max_budget_minutes,
            })
    }

    /// Maximum-priority subset of `tasks` whose durations sum to at most
    /// `budget_minutes`. Pure: `tasks` is only read.
    pub fn optimize<'a>(&self, tasks: &'a [Task], budget_minutes: i64) -> PlanResult<Selection<'a>> {
        let budget = self.check_budget(budget_minutes)?;
        if budget == 0 || tasks.is_empty() {
            return Ok(Selection::empty(budget));
        }

        let n = tasks.len();
        let width = budget as usize + 1;
        debug!(tasks = n, budget, cells = (n + 1) * width, "building knapsack table");

        // Row-major: best[i][t] lives at i * width + t. Row 0 stays zero.
        let mut best = vec![0i64; (n + 1) * width];
        for (i, task) in tasks.iter().enumerate() {
            let d = task.duration_minutes() as usize;
            let p = i64::from(task.priority());
            let (prev, rest) = best.split_at_mut((i + 1) * width);
            let prev = &prev[i * width..];
            let cur = &mut rest[..width];

            for t in 0..width {
                cur[t] = if d > t {
                    prev[t]
                } else {
                    prev[t].max(prev[t - d] + p)
                };
            }
        }

        let mut chosen = Vec::new();
        let mut t = budget as usize;
        for i in (1..=n).rev() {
            if best[i * width + t] != best[(i - 1) * width + t] {
                let task = &tasks[i - 1];
                chosen.push(task);
                t -= task.duration_minutes() as usize;
            }
        }
        chosen.reverse();

        let selection = Selection {
            total_priority: chosen.iter().map(|t| i64::from(t.priority())).sum(),
            total_minutes: chosen.iter().map(|t| u64::from(t.duration_minutes())).sum(),
            tasks: chosen,
            budget_minutes: budget,
        };
        debug_assert_eq!(selection.total_priority, best[n * width + budget as usize]);

        debug!(
            selected = selection.tasks.len(),
            total_priority = selection.total_priority,
            total_minutes = selection.total_minutes,
            "schedule optimized"
        );
        Ok(selection)
    }
}
