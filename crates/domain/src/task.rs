//! Housekeeping task document.

use chrono::{DateTime, Utc};
use common::EntityId;
use serde::{Deserialize, Serialize};

/// Kind of work a housekeeping task asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Cleaning,
    Restocking,
    Maintenance,
}

impl TaskType {
    /// Returns the type name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Cleaning => "cleaning",
            TaskType::Restocking => "restocking",
            TaskType::Maintenance => "maintenance",
        }
    }

    /// Parses a type from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cleaning" => Some(TaskType::Cleaning),
            "restocking" => Some(TaskType::Restocking),
            "maintenance" => Some(TaskType::Maintenance),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Progress state of a housekeeping task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Parses a status from its string form.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(TaskStatus::Pending),
            "in_progress" => Some(TaskStatus::InProgress),
            "completed" => Some(TaskStatus::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A unit of housekeeping or maintenance work scheduled for a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousekeepingTask {
    /// Unique task identifier.
    pub id: EntityId,

    /// Room the work applies to.
    pub room_id: EntityId,

    /// Staff member the task is assigned to, if any.
    pub assignee: Option<EntityId>,

    /// Kind of work requested.
    pub task_type: TaskType,

    /// Progress state.
    pub status: TaskStatus,

    /// When the work is scheduled for.
    pub scheduled_at: DateTime<Utc>,

    /// When the work was completed, if it has been.
    pub completed_at: Option<DateTime<Utc>>,
}

impl HousekeepingTask {
    /// Creates a pending, unassigned task.
    pub fn schedule(room_id: EntityId, task_type: TaskType, scheduled_at: DateTime<Utc>) -> Self {
        Self {
            id: EntityId::new(),
            room_id,
            assignee: None,
            task_type,
            status: TaskStatus::Pending,
            scheduled_at,
            completed_at: None,
        }
    }

    /// Creates the pending cleaning task fired by a checkout.
    pub fn cleaning(room_id: EntityId, scheduled_at: DateTime<Utc>) -> Self {
        Self::schedule(room_id, TaskType::Cleaning, scheduled_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaning_task_defaults() {
        let room_id = EntityId::new();
        let task = HousekeepingTask::cleaning(room_id, Utc::now());

        assert_eq!(task.room_id, room_id);
        assert_eq!(task.task_type, TaskType::Cleaning);
        assert_eq!(task.status, TaskStatus::Pending);
        assert!(task.assignee.is_none());
        assert!(task.completed_at.is_none());
    }

    #[test]
    fn test_type_string_roundtrip() {
        for ty in [TaskType::Cleaning, TaskType::Restocking, TaskType::Maintenance] {
            assert_eq!(TaskType::parse(ty.as_str()), Some(ty));
        }
        assert_eq!(TaskType::parse("inspection"), None);
    }

    #[test]
    fn test_status_string_roundtrip() {
        for status in [TaskStatus::Pending, TaskStatus::InProgress, TaskStatus::Completed] {
            assert_eq!(TaskStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TaskStatus::parse("done"), None);
    }

    #[test]
    fn test_serialization() {
        let task = HousekeepingTask::schedule(EntityId::new(), TaskType::Restocking, Utc::now());
        let json = serde_json::to_string(&task).unwrap();
        let deserialized: HousekeepingTask = serde_json::from_str(&json).unwrap();
        assert_eq!(task, deserialized);
    }
}
