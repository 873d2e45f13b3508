use csv::StringRecord;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub id: u64,
    pub description: String,
}

#[derive(Debug, Error)]
pub enum RecordParseError {
    #[error("Expected 2 fields, found {0}")]
    FieldCount(usize),
    #[error("Invalid task id: {0}")]
    InvalidId(String),
}

/// Parses one stored record into a Task. Records that do not carry exactly
/// an integer id field and a description field are rejected; the store
/// skips them rather than failing the whole load.
pub fn parse_record(record: &StringRecord) -> Result<Task, RecordParseError> {
    if record.len() != 2 {
        return Err(RecordParseError::FieldCount(record.len()));
    }
    let raw_id = record.get(0).unwrap_or("");
    let id = raw_id
        .parse::<u64>()
        .map_err(|_| RecordParseError::InvalidId(raw_id.to_string()))?;
    Ok(Task {
        id,
        description: record.get(1).unwrap_or("").to_string(),
    })
}

/// Next id to assign: one past the current maximum, 1 for an empty
/// collection. Gaps left by deletions are not reused unless the maximum
/// itself was deleted.
pub fn next_id(tasks: &[Task]) -> u64 {
    tasks.iter().map(|task| task.id).max().unwrap_or(0) + 1
}
