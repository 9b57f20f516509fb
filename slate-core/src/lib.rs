//! slate-core: task ordering, deadline lookup and time-boxed schedule
//! selection for a personal planner.

pub mod deadline_index;
pub mod error;
pub mod optimizer;
pub mod planner;
pub mod task;
pub mod task_store;
pub mod time;
pub mod timeline;

pub use deadline_index::DeadlineIndex;
pub use error::{PlanError, PlanResult, ValidationError};
pub use optimizer::{ScheduleOptimizer, Selection, DEFAULT_MAX_BUDGET_MINUTES};
pub use planner::Planner;
pub use task::{Category, NewTask, Task};
pub use task_store::{SortKey, TaskStore};
pub use time::{format_deadline, parse_date, parse_deadline};
pub use timeline::TimelineBar;
