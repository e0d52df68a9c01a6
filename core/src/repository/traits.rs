use crate::model::task::TaskRecord;
use anyhow::Result;

pub trait TaskRepository {
    fn load(&self) -> Result<Vec<TaskRecord>>;
    fn save(&self, records: &[TaskRecord]) -> Result<()>;
}
