//! Task model.
//!
//! A [`Task`] is immutable once built; every field is validated on the way in.
//! Callers holding raw form input go through [`NewTask`].

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::error::ValidationError;
use crate::time::{parse_deadline, serialize_deadline};

/// Task category. Open set; the two common tags get their own variants.
///
/// Equality and ordering go through [`Category::as_str`], so categories sort
/// lexicographically by label.
#[derive(Debug, Clone)]
pub enum Category {
    Personal,
    Academic,
    Other(String),
}

impl Category {
    /// Labels are trimmed and lowercased.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let label = text.trim().to_lowercase();
        match label.as_str() {
            "" => Err(ValidationError::EmptyCategory),
            "personal" => Ok(Category::Personal),
            "academic" => Ok(Category::Academic),
            _ => Ok(Category::Other(label)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Personal => "personal",
            Category::Academic => "academic",
            Category::Other(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}
impl Eq for Category {}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(self.as_str())
    }
}

/// Core task type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    id: u64,
    description: String,
    #[serde(serialize_with = "serialize_deadline")]
    deadline: NaiveDateTime,
    /// Higher means more important.
    priority: i32,
    category: Category,
    /// Minutes, always > 0.
    duration_minutes: u32,
}

impl Task {
    pub fn new(
        id: u64,
        description: impl Into<String>,
        deadline: NaiveDateTime,
        priority: i32,
        category: Category,
        duration_minutes: u32,
    ) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::NonPositiveId(0));
        }
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        // `Other` labels may come straight from a caller; normalize them.
        let category = Category::parse(category.as_str())?;
        if duration_minutes == 0 {
            return Err(ValidationError::NonPositiveDuration(0));
        }

        Ok(Self {
            id,
            description,
            deadline,
            priority,
            category,
            duration_minutes,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn deadline(&self) -> NaiveDateTime {
        self.deadline
    }

    /// Calendar date the task is due on.
    pub fn due_date(&self) -> NaiveDate {
        self.deadline.date()
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }
}

/// Raw task fields as a form or file hands them over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub id: i64,
    pub description: String,
    /// `YYYY-MM-DD HH:MM`
    pub deadline: String,
    pub priority: i32,
    pub category: String,
    pub duration_minutes: i64,
}

impl NewTask {
    /// Defaults: priority 1, category "personal", 30 minutes. A priority of
    /// zero or less never raises the optimizer's total, so such tasks are
    /// never selected.
    pub fn new(id: i64, description: impl Into<String>, deadline: impl Into<String>) -> Self {
        Self {
            id,
            description: description.into(),
            deadline: deadline.into(),
            priority: 1,
            category: "personal".to_string(),
            duration_minutes: 30,
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = minutes;
        self
    }

    /// Validate every field and build the immutable task.
    pub fn into_task(self) -> Result<Task, ValidationError> {
        let id = u64::try_from(self.id)
            .ok()
            .filter(|id| *id > 0)
            .ok_or(ValidationError::NonPositiveId(self.id))?;

        if self.description.trim().is_empty() {
            return Err(ValidationError::EmptyDescription);
        }

        let deadline = parse_deadline(&self.deadline)?;
        let category = Category::parse(&self.category)?;

        if self.duration_minutes <= 0 {
            return Err(ValidationError::NonPositiveDuration(self.duration_minutes));
        }
        let duration = u32::try_from(self.duration_minutes)
            .map_err(|_| ValidationError::DurationOutOfRange(self.duration_minutes))?;

        Task::new(
            id,
            self.description,
            deadline,
            self.priority,
            category,
            duration,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn homework() -> NewTask {
        NewTask::new(1, "Math homework", "2023-11-15 16:00")
            .with_priority(10)
            .with_category("academic")
            .with_duration(60)
    }

    #[test]
    fn builds_task_from_raw_fields() {
        let t = homework().into_task().unwrap();
        assert_eq!(t.id(), 1);
        assert_eq!(t.description(), "Math homework");
        assert_eq!(t.priority(), 10);
        assert_eq!(t.category(), &Category::Academic);
        assert_eq!(t.duration_minutes(), 60);
        assert_eq!(t.due_date(), NaiveDate::from_ymd_opt(2023, 11, 15).unwrap());
    }

    #[test]
    fn rejects_bad_fields() {
        assert_eq!(
            homework().with_duration(0).into_task(),
            Err(ValidationError::NonPositiveDuration(0))
        );
        assert_eq!(
            homework().with_duration(-15).into_task(),
            Err(ValidationError::NonPositiveDuration(-15))
        );
        assert_eq!(
            homework().with_category("  ").into_task(),
            Err(ValidationError::EmptyCategory)
        );

        let mut blank = homework();
        blank.description = "   ".to_string();
        assert_eq!(blank.into_task(), Err(ValidationError::EmptyDescription));

        let mut neg = homework();
        neg.id = -4;
        assert_eq!(neg.into_task(), Err(ValidationError::NonPositiveId(-4)));

        let mut late = homework();
        late.deadline = "15/11/2023 16:00".to_string();
        assert!(matches!(
            late.into_task(),
            Err(ValidationError::MalformedDeadline { .. })
        ));
    }

    #[test]
    fn rejects_duration_past_u32() {
        let huge = i64::from(u32::MAX) + 1;
        assert_eq!(
            homework().with_duration(huge).into_task(),
            Err(ValidationError::DurationOutOfRange(huge))
        );
    }

    #[test]
    fn category_labels_are_normalized_and_ordered() {
        assert_eq!(Category::parse("Personal").unwrap(), Category::Personal);
        assert_eq!(Category::parse(" ACADEMIC ").unwrap(), Category::Academic);
        assert_eq!(Category::parse("Work").unwrap().as_str(), "work");
        assert_eq!(Category::Other("personal".into()), Category::Personal);

        let mut cats = vec![
            Category::Personal,
            Category::parse("work").unwrap(),
            Category::Academic,
            Category::parse("errands").unwrap(),
        ];
        cats.sort();
        let labels: Vec<&str> = cats.iter().map(Category::as_str).collect();
        assert_eq!(labels, vec!["academic", "errands", "personal", "work"]);
    }

    #[test]
    fn task_new_normalizes_other_labels() {
        let deadline = parse_deadline("2023-11-15 16:00").unwrap();
        let t = Task::new(1, "x", deadline, 1, Category::Other(" Work ".into()), 10).unwrap();
        assert_eq!(t.category().as_str(), "work");
        assert!(t.category() > &Category::Academic);

        let t = Task::new(2, "x", deadline, 1, Category::Other("PERSONAL".into()), 10).unwrap();
        assert!(matches!(t.category(), Category::Personal));

        assert_eq!(
            Task::new(3, "x", deadline, 1, Category::Other("  ".into()), 10),
            Err(ValidationError::EmptyCategory)
        );
    }

    #[test]
    fn builder_default_priority_is_selectable() {
        let t = NewTask::new(1, "Exercise", "2023-11-15 18:00").into_task().unwrap();
        assert_eq!(t.priority(), 1);
    }

    #[test]
    fn serializes_with_input_deadline_format() {
        let t = homework().into_task().unwrap();
        let v = serde_json::to_value(&t).unwrap();
        assert_eq!(v["deadline"], "2023-11-15 16:00");
        assert_eq!(v["category"], "academic");
        assert_eq!(v["duration_minutes"], 60);
    }
}
