pub mod error;
pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod time;

pub use error::DukeError;
pub use input::{parse_command, Command};
pub use model::task::{RecordKind, Task, TaskKind, TaskRecord};
pub use model::task_list::{Entry, Removed, TaskList};
pub use repository::{FileTaskRepository, TaskRepository};
pub use service::outcome::Outcome;
pub use service::task_service::{apply, TaskService};
pub use time::{is_ordered, normalize, parse_storage, CanonicalDateTime};
