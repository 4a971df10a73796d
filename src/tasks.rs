//!
//! # Task Service
//!
//! CRUD over the tasks of the currently-selected list, plus list management
//! and progress recomputation. Every mutation is read-modify-written against
//! the per-user board record, and a progress snapshot is written alongside.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Board, Task, TaskInput, TaskList, UserProfile, DEFAULT_LIST_ID};
use crate::storage::{board_key, progress_key, KvStore};

/// One of four mutually exclusive progress states, checked in strict order:
/// no tasks, everything done, nothing done, partially done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressMessage {
    Empty,
    AllDone,
    AllPending { total: usize },
    Partial { remaining: usize },
}

impl fmt::Display for ProgressMessage {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProgressMessage::Empty => write!(f, "Add your first task!"),
            ProgressMessage::AllDone => write!(f, "🎉 All tasks completed! Well done!"),
            ProgressMessage::AllPending { total } => write!(
                f,
                "{} task{} waiting for you",
                total,
                if *total > 1 { "s" } else { "" }
            ),
            ProgressMessage::Partial { remaining } => write!(
                f,
                "Great progress! {} task{} remaining",
                remaining,
                if *remaining > 1 { "s" } else { "" }
            ),
        }
    }
}

/// Derived statistic over a task sequence. Recomputed after every mutation,
/// never stored as source of truth.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub percentage: f64,
    pub message: ProgressMessage,
}

/// Computes the progress statistic for a task sequence.
pub fn compute_progress(tasks: &[Task]) -> Progress {
    let total = tasks.len();
    let completed = tasks.iter().filter(|task| task.completed).count();
    let pending = total - completed;
    let percentage = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    };
    let message = if total == 0 {
        ProgressMessage::Empty
    } else if completed == total {
        ProgressMessage::AllDone
    } else if completed == 0 {
        ProgressMessage::AllPending { total }
    } else {
        ProgressMessage::Partial { remaining: pending }
    };

    Progress {
        total,
        completed,
        pending,
        percentage,
        message,
    }
}

/// The persisted progress snapshot. Write-only cache; nothing reads it back.
#[derive(Debug, Serialize)]
struct ProgressSnapshot {
    total: usize,
    completed: usize,
    percentage: f64,
    timestamp: DateTime<Utc>,
}

/// Task and list operations scoped to one user's board and a current list.
pub struct TaskService {
    store: Arc<dyn KvStore>,
    user: UserProfile,
    board: Board,
    current_list: String,
}

impl TaskService {
    /// Loads the user's board from storage, creating a fresh one (with the
    /// default list) on first use. The current list starts at the default.
    pub fn open(store: Arc<dyn KvStore>, user: UserProfile) -> Result<Self, AppError> {
        let mut board = match store.get(&board_key(&user.id))? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Board::new(),
        };
        // A stored board always carries the default list; repair it if a
        // hand-edited data file dropped it.
        if !board.contains(DEFAULT_LIST_ID) {
            board.lists.insert(
                0,
                TaskList::new(
                    DEFAULT_LIST_ID.to_string(),
                    "My Tasks".to_string(),
                    crate::models::COLOR_PALETTE[0].to_string(),
                ),
            );
        }
        Ok(Self {
            store,
            user,
            board,
            current_list: DEFAULT_LIST_ID.to_string(),
        })
    }

    pub fn user(&self) -> &UserProfile {
        &self.user
    }

    pub fn lists(&self) -> &[TaskList] {
        &self.board.lists
    }

    pub fn current_list_id(&self) -> &str {
        &self.current_list
    }

    pub fn current_list(&self) -> &TaskList {
        self.board
            .get(&self.current_list)
            .expect("current list always exists")
    }

    fn current_list_mut(&mut self) -> &mut TaskList {
        self.board
            .get_mut(&self.current_list)
            .expect("current list always exists")
    }

    /// Adds a task to the front of the current list (newest first).
    pub fn add_task(&mut self, input: TaskInput) -> Result<Task, AppError> {
        let input = TaskInput {
            name: input.name.trim().to_string(),
            ..input
        };
        input.validate()?;

        let task = Task::new(input);
        self.current_list_mut().tasks.insert(0, task.clone());
        self.persist()?;
        log::debug!("added task {} to list {}", task.id, self.current_list);
        Ok(task)
    }

    /// Flips a task's completion flag, stamping or clearing `completed_at`.
    /// Unknown ids are silently ignored; they can only come from stale UI.
    pub fn toggle_task(&mut self, id: Uuid) -> Result<(), AppError> {
        match self.current_list_mut().tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                task.completed_at = if task.completed { Some(Utc::now()) } else { None };
            }
            None => {
                log::debug!("toggle for unknown task {} ignored", id);
                return Ok(());
            }
        }
        self.persist()
    }

    /// Updates a pending task's fields and stamps `updated_at`.
    ///
    /// Editing a completed task is blocked with a validation error; a `None`
    /// date keeps the existing one. Unknown ids no-op like toggle/delete.
    pub fn edit_task(&mut self, id: Uuid, input: TaskInput) -> Result<(), AppError> {
        let input = TaskInput {
            name: input.name.trim().to_string(),
            ..input
        };
        input.validate()?;

        match self.current_list_mut().tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                if task.completed {
                    return Err(AppError::Validation(
                        "Completed tasks cannot be edited".into(),
                    ));
                }
                task.name = input.name;
                if let Some(date) = input.date {
                    task.date = date;
                }
                task.emoji = input.emoji;
                task.updated_at = Some(Utc::now());
            }
            None => {
                log::debug!("edit for unknown task {} ignored", id);
                return Ok(());
            }
        }
        self.persist()
    }

    /// Removes a task. Confirmation is the caller's concern; once called the
    /// removal is unconditional. Unknown ids are silently ignored.
    pub fn delete_task(&mut self, id: Uuid) -> Result<(), AppError> {
        let list = self.current_list_mut();
        let before = list.tasks.len();
        list.tasks.retain(|task| task.id != id);
        if list.tasks.len() == before {
            log::debug!("delete for unknown task {} ignored", id);
            return Ok(());
        }
        self.persist()
    }

    /// Progress of the current list.
    pub fn progress(&self) -> Progress {
        compute_progress(&self.current_list().tasks)
    }

    /// Creates a new list with a fresh id and the next palette color, and
    /// returns its id.
    pub fn create_list(&mut self, name: &str) -> Result<String, AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Please enter a list name".into()));
        }
        let id = Uuid::new_v4().to_string();
        let color = self.board.next_color();
        self.board
            .lists
            .push(TaskList::new(id.clone(), name.to_string(), color));
        self.persist()?;
        Ok(id)
    }

    /// Renames a list. Unknown ids are silently ignored.
    pub fn rename_list(&mut self, id: &str, name: &str) -> Result<(), AppError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("Please enter a list name".into()));
        }
        match self.board.get_mut(id) {
            Some(list) => {
                list.name = name.to_string();
                self.persist()
            }
            None => Ok(()),
        }
    }

    /// Deletes a list. The default list is protected; deleting the current
    /// list moves the selector back to the default.
    pub fn delete_list(&mut self, id: &str) -> Result<(), AppError> {
        if id == DEFAULT_LIST_ID {
            return Err(AppError::Validation(
                "The default list cannot be deleted".into(),
            ));
        }
        let before = self.board.lists.len();
        self.board.lists.retain(|list| list.id != id);
        if self.board.lists.len() == before {
            return Ok(());
        }
        if self.current_list == id {
            self.current_list = DEFAULT_LIST_ID.to_string();
        }
        self.persist()
    }

    /// Switches the current list. Unknown ids are silently ignored.
    pub fn switch_list(&mut self, id: &str) {
        if self.board.contains(id) {
            self.current_list = id.to_string();
        } else {
            log::debug!("switch to unknown list {} ignored", id);
        }
    }

    fn persist(&self) -> Result<(), AppError> {
        self.store.set(
            &board_key(&self.user.id),
            &serde_json::to_string(&self.board)?,
        )?;

        let progress = self.progress();
        let snapshot = ProgressSnapshot {
            total: progress.total,
            completed: progress.completed,
            percentage: progress.percentage,
            timestamp: Utc::now(),
        };
        self.store.set(
            &progress_key(&self.user.id),
            &serde_json::to_string(&snapshot)?,
        )
    }
}
