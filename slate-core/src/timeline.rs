//! Timeline bars handed to a chart renderer.
//!
//! Each bar places a task at `deadline - origin` minutes with the task's
//! duration as its width. The origin is the caller's choice (usually "now"
//! or the earliest deadline); no drawing happens here.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::task::Task;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineBar<'a> {
    #[serde(rename = "id", serialize_with = "serialize_task_id")]
    pub task: &'a Task,
    /// Negative when the deadline is before the origin.
    pub start_offset_minutes: i64,
    pub duration_minutes: u32,
    pub label: String,
}

fn serialize_task_id<S: serde::Serializer>(task: &&Task, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(task.id())
}

/// Bars for `tasks` in the order given.
pub fn bars<'a, I>(tasks: I, origin: NaiveDateTime) -> Vec<TimelineBar<'a>>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .map(|task| TimelineBar {
            task,
            start_offset_minutes: (task.deadline() - origin).num_minutes(),
            duration_minutes: task.duration_minutes(),
            label: task.description().to_string(),
        })
        .collect()
}

pub fn earliest_deadline<'a, I>(tasks: I) -> Option<NaiveDateTime>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks.into_iter().map(Task::deadline).min()
}
