use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Reserved id of the list every board starts with. It can never be deleted.
pub const DEFAULT_LIST_ID: &str = "default";

/// Fixed color palette handed out to new lists, first-unused wins.
pub const COLOR_PALETTE: [&str; 6] = [
    "#ff6b6b", "#4ecdc4", "#45b7d1", "#96ceb4", "#ffeaa7", "#04fc57",
];

/// A named, colored container of tasks, newest task first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskList {
    pub id: String,
    pub name: String,
    pub color_tag: String,
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(id: String, name: String, color_tag: String) -> Self {
        Self {
            id,
            name,
            color_tag,
            tasks: Vec::new(),
        }
    }
}

/// A user's ordered collection of task lists.
///
/// Invariant: list ids are unique and the default list always exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    pub lists: Vec<TaskList>,
}

impl Board {
    pub fn new() -> Self {
        Self {
            lists: vec![TaskList::new(
                DEFAULT_LIST_ID.to_string(),
                "My Tasks".to_string(),
                COLOR_PALETTE[0].to_string(),
            )],
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.lists.iter().any(|list| list.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&TaskList> {
        self.lists.iter().find(|list| list.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut TaskList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }

    /// Picks the first palette color no existing list uses. Once the palette
    /// is exhausted, falls back to reusing a random palette entry.
    pub fn next_color(&self) -> String {
        for color in COLOR_PALETTE {
            if !self.lists.iter().any(|list| list.color_tag == color) {
                return color.to_string();
            }
        }
        let index = rand::thread_rng().gen_range(0..COLOR_PALETTE.len());
        COLOR_PALETTE[index].to_string()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
