use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Input structure for creating or editing a task.
/// Contains validation rules for its fields.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct TaskInput {
    /// The task name. Must be between 1 and 200 characters; callers trim
    /// surrounding whitespace before validating.
    #[validate(length(min = 1, max = 200, message = "Please enter a task name"))]
    pub name: String,

    /// Optional target date; defaults to the creation day when absent.
    pub date: Option<NaiveDate>,

    /// Optional decorative emoji.
    pub emoji: Option<String>,
}

/// A task entity as stored inside its list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The task name.
    pub name: String,
    /// The day the task is planned for.
    pub date: NaiveDate,
    /// Optional decorative emoji.
    pub emoji: Option<String>,
    /// Completion flag. This is the sole partition key between the pending
    /// and completed counts.
    pub completed: bool,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Set when the task transitions to completed, cleared when it is
    /// toggled back to pending.
    pub completed_at: Option<DateTime<Utc>>,
    /// Timestamp of the last edit, if any.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Creates a new pending `Task` from `TaskInput`.
    /// Sets `created_at` to the current time and defaults the date to today.
    pub fn new(input: TaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            date: input.date.unwrap_or_else(|| now.date_naive()),
            emoji: input.emoji,
            completed: false,
            created_at: now,
            completed_at: None,
            updated_at: None,
        }
    }
}
