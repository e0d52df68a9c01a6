use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use crate::model::task::{RecordKind, TaskRecord};
use crate::repository::traits::TaskRepository;

const DEFAULT_DIR_NAME: &str = ".duke";
const DEFAULT_FILE_NAME: &str = "duke.txt";
const FIELD_SEPARATOR: &str = " | ";

/// Stores the task list in a single file. Paths ending in `.json` hold a
/// JSON array of records; anything else uses the line format:
///
/// ```text
/// T | 1 | read book
/// D | 0 | submit report | 2019-12-01
/// E | 0 | trip | 2019-12-01 | 2019-12-02 18:00
/// ```
#[derive(Clone, Debug)]
pub struct FileTaskRepository {
    file_path: PathBuf,
}

impl FileTaskRepository {
    pub fn new(file_path: Option<PathBuf>) -> Result<Self> {
        let path = match file_path {
            Some(path) => path,
            None => {
                let home_dir = dirs::home_dir()
                    .ok_or_else(|| anyhow!("Could not determine home directory"))?;
                home_dir.join(DEFAULT_DIR_NAME).join(DEFAULT_FILE_NAME)
            }
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        Ok(FileTaskRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    fn is_json(&self) -> bool {
        self.file_path.extension().and_then(|s| s.to_str()) == Some("json")
    }

    fn read_json(&self) -> Result<Vec<TaskRecord>> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let records = serde_json::from_reader(reader)?;
        Ok(records)
    }

    fn write_json(&self, records: &[TaskRecord]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, records)?;
        writer.flush()?;
        Ok(())
    }

    fn read_lines(&self) -> Result<Vec<TaskRecord>> {
        let content = fs::read_to_string(&self.file_path)?;
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| decode_line(line).with_context(|| format!("line {}", i + 1)))
            .collect()
    }

    fn write_lines(&self, records: &[TaskRecord]) -> Result<()> {
        let file = File::create(&self.file_path)?;
        let mut writer = BufWriter::new(file);
        for record in records {
            writeln!(writer, "{}", encode_line(record))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl TaskRepository for FileTaskRepository {
    fn load(&self) -> Result<Vec<TaskRecord>> {
        if !self.file_path.exists() {
            return Ok(Vec::new());
        }

        let loaded = if self.is_json() {
            self.read_json()
        } else {
            self.read_lines()
        };
        let records =
            loaded.with_context(|| format!("Failed to load tasks from {:?}", self.file_path))?;

        info!(count = records.len(), path = ?self.file_path, "loaded tasks");
        Ok(records)
    }

    fn save(&self, records: &[TaskRecord]) -> Result<()> {
        let written = if self.is_json() {
            self.write_json(records)
        } else {
            self.write_lines(records)
        };
        written.with_context(|| format!("Failed to save tasks to {:?}", self.file_path))?;

        info!(count = records.len(), path = ?self.file_path, "saved tasks");
        Ok(())
    }
}

pub fn encode_line(record: &TaskRecord) -> String {
    let mut fields = vec![
        format!("{:?}", record.kind),
        if record.done { "1" } else { "0" }.to_string(),
        record.description.clone(),
    ];
    fields.extend(
        [&record.by, &record.from, &record.to]
            .into_iter()
            .flatten()
            .cloned(),
    );
    fields.join(FIELD_SEPARATOR)
}

// Kind and done flag are read from the left and dates from the right, so
// the description in between may itself contain the separator.
pub fn decode_line(line: &str) -> Result<TaskRecord> {
    let mut parts = line.splitn(3, FIELD_SEPARATOR);
    let (kind, done, rest) = match (parts.next(), parts.next(), parts.next()) {
        (Some(kind), Some(done), Some(rest)) => (kind, done, rest),
        _ => bail!("Expected at least three fields in {:?}", line),
    };

    let kind = match kind {
        "T" => RecordKind::T,
        "D" => RecordKind::D,
        "E" => RecordKind::E,
        other => bail!("Unknown task kind {:?}", other),
    };
    let done = match done {
        "1" => true,
        "0" => false,
        other => bail!("Unknown done flag {:?}", other),
    };

    let mut record = TaskRecord {
        kind,
        done,
        description: rest.to_string(),
        by: None,
        from: None,
        to: None,
    };

    match kind {
        RecordKind::T => {}
        RecordKind::D => {
            let (description, by) = split_last_field(rest)?;
            record.description = description.to_string();
            record.by = Some(by.to_string());
        }
        RecordKind::E => {
            let (head, to) = split_last_field(rest)?;
            let (description, from) = split_last_field(head)?;
            record.description = description.to_string();
            record.from = Some(from.to_string());
            record.to = Some(to.to_string());
        }
    }

    Ok(record)
}

fn split_last_field(text: &str) -> Result<(&str, &str)> {
    text.rsplit_once(FIELD_SEPARATOR)
        .ok_or_else(|| anyhow!("Missing date field in {:?}", text))
}
