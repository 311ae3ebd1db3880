// Portable board document: the hand-off format used to update the remote
// snapshot out-of-band.

use crate::error::BoardError;
use crate::models::Task;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wire envelope: `{"lastUpdated": "<ISO-8601>", "tasks": [...]}`.
///
/// `lastUpdated` is metadata about the export, not task data; it is ignored
/// on import.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardDocument {
    pub last_updated: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

/// Older exports were a bare task array; both forms import.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Wrapped { tasks: Vec<Task> },
    Bare(Vec<Task>),
}

/// Remote snapshot body. A document without a `tasks` field is an empty
/// board, not an error.
#[derive(Deserialize)]
struct Snapshot {
    #[serde(default)]
    tasks: Vec<Task>,
}

/// Serialize the collection as a pretty-printed shareable document.
pub fn export_document(tasks: &[Task]) -> Result<String, BoardError> {
    let doc = BoardDocument {
        last_updated: Utc::now(),
        tasks: tasks.to_vec(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Parse a shared document back into a collection.
///
/// Fails with `Parse` on malformed JSON; the caller's collection is left
/// unmodified in that case.
pub fn import_document(text: &str) -> Result<Vec<Task>, BoardError> {
    let payload: ImportPayload = serde_json::from_str(text)?;
    Ok(match payload {
        ImportPayload::Wrapped { tasks } => tasks,
        ImportPayload::Bare(tasks) => tasks,
    })
}

/// Parse the remote snapshot body fetched at bootstrap.
pub fn parse_snapshot(text: &str) -> Result<Vec<Task>, BoardError> {
    let snapshot: Snapshot = serde_json::from_str(text)?;
    Ok(snapshot.tasks)
}
