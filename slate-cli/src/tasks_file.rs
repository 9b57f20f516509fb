//! Task batches in CSV.
//!
//! Header: id,description,deadline,priority,category,duration
//!
//! An empty `id` means "next free id": numbering starts above the largest
//! id written anywhere in the file. Every row goes through
//! `Planner::add_task`, so the first bad row stops the load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use slate_core::{NewTask, Planner, ScheduleOptimizer};
use std::fs::OpenOptions;
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRow {
    #[serde(default)]
    pub id: Option<i64>,
    pub description: String,
    pub deadline: String,
    pub priority: i32,
    pub category: String,
    /// Minutes.
    pub duration: i64,
}

impl TaskRow {
    pub fn into_new_task(self, fallback_id: u64) -> NewTask {
        let id = self
            .id
            .unwrap_or_else(|| i64::try_from(fallback_id).unwrap_or(i64::MAX));
        NewTask::new(id, self.description, self.deadline)
            .with_priority(self.priority)
            .with_category(self.category)
            .with_duration(self.duration)
    }
}

/// Build a planner from a task file. A missing file gives an empty planner.
pub fn load_planner(path: &Path, optimizer: ScheduleOptimizer) -> Result<Planner> {
    let mut planner = Planner::with_optimizer(optimizer);
    if !path.exists() {
        info!("no task file at {}, starting empty", path.display());
        return Ok(planner);
    }

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    // Read every row before numbering, so blank ids never take an id that
    // a later row states explicitly.
    let mut rows = Vec::new();
    for (i, result) in rdr.deserialize::<TaskRow>().enumerate() {
        // header is line 1
        let line = i + 2;
        let row = result.with_context(|| format!("{}:{line}: unreadable row", path.display()))?;
        rows.push((line, row));
    }

    let mut next_id = rows
        .iter()
        .filter_map(|(_, r)| r.id)
        .max()
        .map_or(1, |max| max.max(0) as u64 + 1);

    for (line, row) in rows {
        let fallback = next_id;
        if row.id.is_none() {
            next_id += 1;
        }
        planner
            .add_task(row.into_new_task(fallback))
            .with_context(|| format!("{}:{line}: invalid task", path.display()))?;
    }

    debug!(count = planner.store().len(), "loaded {}", path.display());
    Ok(planner)
}

/// Append one row, writing the header first if the file is new or empty.
pub fn append_row(path: &Path, row: &TaskRow) -> Result<()> {
    let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open {}", path.display()))?;

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(needs_header)
        .from_writer(file);
    wtr.serialize(row)
        .with_context(|| format!("write {}", path.display()))?;
    wtr.flush().with_context(|| format!("flush {}", path.display()))?;
    Ok(())
}
