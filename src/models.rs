// Data models for the task board

use crate::error::BoardError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A single card on the board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: Status,
    #[serde(default)]
    pub assignee: Assignee,
    pub created: DateTime<Utc>,
}

/// Board column a task lives in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// Columns in render order
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "todo" => Ok(Status::Todo),
            "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            other => Err(BoardError::UnknownStatus(other.to_string())),
        }
    }
}

/// Who a task belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Assignee {
    Rene,
    Scott,
    #[default]
    Both,
}

impl Assignee {
    pub fn as_str(self) -> &'static str {
        match self {
            Assignee::Rene => "rene",
            Assignee::Scott => "scott",
            Assignee::Both => "both",
        }
    }

    /// Decorated label for board rendering
    pub fn label(self) -> &'static str {
        match self {
            Assignee::Rene => "🤖 Rene",
            Assignee::Scott => "👨‍💻 Scott",
            Assignee::Both => "🤝 Both",
        }
    }
}

impl fmt::Display for Assignee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parser for operator input; unknown names are rejected so typos
/// surface instead of silently landing on "both".
impl FromStr for Assignee {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "rene" => Ok(Assignee::Rene),
            "scott" => Ok(Assignee::Scott),
            "both" => Ok(Assignee::Both),
            other => Err(BoardError::UnknownAssignee(other.to_string())),
        }
    }
}

impl Serialize for Assignee {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        s.serialize_str(self.as_str())
    }
}

// Lenient on the wire: documents may carry assignees this board no longer
// recognizes, and those load as "both" rather than failing the whole parse.
impl<'de> Deserialize<'de> for Assignee {
    fn deserialize<D>(d: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(d)?;
        Ok(s.parse().unwrap_or(Assignee::Both))
    }
}

/// Current timestamp in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time before Unix epoch")
        .as_millis() as i64
}
