pub mod list;
pub mod session;
pub mod task;
pub mod user;

pub use list::{Board, TaskList, COLOR_PALETTE, DEFAULT_LIST_ID};
pub use session::Session;
pub use task::{Task, TaskInput};
pub use user::{User, UserProfile};
