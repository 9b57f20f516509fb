use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDateTime};
use clap::{Parser, Subcommand};
use slate_core::{
    format_deadline, parse_date, timeline, Planner, ScheduleOptimizer, SortKey, Task,
};
use std::path::PathBuf;
use tracing::info;

mod config;
mod logging;
mod tasks_file;

use config::TimelineOrigin;
use tasks_file::TaskRow;

#[derive(Parser, Debug)]
#[command(name = "slate", version, about = "Personal task planner")]
struct Cli {
    /// Task file (CSV). Defaults to planner.tasks_file from the config.
    #[arg(long, global = true)]
    tasks: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a task and append it to the task file
    Add {
        /// Id to use (default: one past the largest id)
        #[arg(long)]
        id: Option<i64>,

        #[arg(long)]
        description: String,

        /// YYYY-MM-DD HH:MM
        #[arg(long)]
        deadline: String,

        /// Higher is more important
        #[arg(long, allow_negative_numbers = true)]
        priority: i32,

        /// e.g. personal, academic
        #[arg(long, default_value = "personal")]
        category: String,

        /// Minutes
        #[arg(long, allow_negative_numbers = true)]
        duration: i64,
    },

    /// List tasks sorted by deadline, priority or category
    List {
        #[arg(long)]
        by: Option<SortKey>,
    },

    /// Tasks due on a calendar date
    Find {
        /// YYYY-MM-DD
        #[arg(long)]
        date: String,
    },

    /// Pick the highest-priority set of tasks that fits in the given time
    Optimize {
        /// Available minutes
        #[arg(long, allow_negative_numbers = true)]
        minutes: i64,
    },

    /// Timeline bars (task, start offset, duration, label) for charting
    Timeline {
        #[arg(long, value_enum)]
        origin: Option<TimelineOrigin>,
    },

    /// Configuration file commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write ~/.slate/config.toml with defaults if it does not exist
    Init,
    /// Print the effective configuration
    Show,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    logging::init_logging(cli.verbose, &cfg.log.level);

    let tasks_path = cli
        .tasks
        .clone()
        .unwrap_or_else(|| cfg.planner.tasks_file.clone());
    let optimizer = ScheduleOptimizer::new(cfg.planner.max_budget_minutes);

    match cli.command {
        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },

        Command::Add {
            id,
            description,
            deadline,
            priority,
            category,
            duration,
        } => {
            let mut planner = tasks_file::load_planner(&tasks_path, optimizer)?;
            let next_id = planner.next_id();
            // Pin the id in the file so reloads see the same task.
            let row = TaskRow {
                id: Some(id.unwrap_or(next_id as i64)),
                description,
                deadline,
                priority,
                category,
                duration,
            };
            let task = planner.add_task(row.clone().into_new_task(next_id))?;
            tasks_file::append_row(&tasks_path, &row)?;
            info!(id = task.id(), "task saved to {}", tasks_path.display());

            if cli.json {
                println!("{}", serde_json::to_string_pretty(task)?);
            } else {
                println!("Added:");
                print_task(task);
            }
        }

        Command::List { by } => {
            let planner = tasks_file::load_planner(&tasks_path, optimizer)?;
            let key = by.unwrap_or(cfg.planner.default_sort);
            let tasks = planner.list_tasks(key);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else {
                println!("# {} tasks by {}\n", tasks.len(), key);
                print_tasks(&tasks);
            }
        }

        Command::Find { date } => {
            let planner = tasks_file::load_planner(&tasks_path, optimizer)?;
            let day = parse_date(&date)?;
            let tasks = planner.find_by_date(day);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&tasks)?);
            } else if tasks.is_empty() {
                println!("No tasks due on {day}");
            } else {
                println!("# Due on {day}\n");
                print_tasks(&tasks);
            }
        }

        Command::Optimize { minutes } => {
            let planner = tasks_file::load_planner(&tasks_path, optimizer)?;
            let selection = planner.optimize_schedule(minutes)?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&selection)?);
            } else if selection.is_empty() {
                println!("Nothing fits in {minutes} minutes");
            } else {
                println!(
                    "# Selected {} tasks: priority {} in {} of {} minutes\n",
                    selection.tasks.len(),
                    selection.total_priority,
                    selection.total_minutes,
                    selection.budget_minutes
                );
                print_tasks(&selection.tasks);
            }
        }

        Command::Timeline { origin } => {
            let planner = tasks_file::load_planner(&tasks_path, optimizer)?;
            let origin = origin.unwrap_or(cfg.timeline.origin);
            let Some(start) = resolve_origin(&planner, origin) else {
                bail!("no tasks in {}", tasks_path.display());
            };
            let bars = planner.timeline(start);

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&bars)?);
            } else {
                println!("# Timeline from {}\n", format_deadline(start));
                for b in &bars {
                    println!(
                        "{:>4}  start={:>+7}m  len={:>4}m  {}",
                        b.task.id(),
                        b.start_offset_minutes,
                        b.duration_minutes,
                        b.label
                    );
                }
            }
        }
    }

    Ok(())
}

fn resolve_origin(planner: &Planner, origin: TimelineOrigin) -> Option<NaiveDateTime> {
    match origin {
        TimelineOrigin::Now => Some(Local::now().naive_local()),
        TimelineOrigin::Earliest => timeline::earliest_deadline(planner.store().all()),
    }
}

fn print_task(t: &Task) {
    println!(
        "{:>4}  {}  p={:<4} {:<10} {:>4}m  {}",
        t.id(),
        format_deadline(t.deadline()),
        t.priority(),
        t.category().as_str(),
        t.duration_minutes(),
        t.description()
    );
}

fn print_tasks(tasks: &[&Task]) {
    for t in tasks {
        print_task(t);
    }
}
