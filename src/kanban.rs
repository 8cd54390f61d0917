//! Task Board Drops
//!
//! A drop sends one status PUT and then reloads the board whatever the
//! server answered, so the optimistic move is either confirmed or undone.

use crate::api::{self, Backend};
use crate::loader::{load_all, Collection, Loaded};
use crate::models::TaskStatus;

const RELOAD: &[Collection] = &[Collection::Tasks, Collection::TaskMetrics];

/// Notification for a finished drop
#[derive(Debug, Clone, PartialEq)]
pub enum DropNotice {
    Moved(TaskStatus),
    Failed(String),
}

impl DropNotice {
    pub fn message(&self) -> String {
        match self {
            DropNotice::Moved(status) => format!("Task moved to {}", status.label()),
            DropNotice::Failed(reason) if reason.is_empty() => "Failed to update task status".to_string(),
            DropNotice::Failed(reason) => format!("Failed to update task status: {reason}"),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, DropNotice::Failed(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dropped {
    pub notice: DropNotice,
    pub reloaded: Vec<Loaded>,
}

pub async fn drop_task<B: Backend>(api: &B, task_id: &str, status: TaskStatus) -> Dropped {
    let notice = match api::update_task_status(api, task_id, status).await {
        Ok(_) => {
            tracing::info!(task_id, status = status.as_str(), "task moved");
            DropNotice::Moved(status)
        }
        Err(err) => {
            tracing::error!(task_id, error = %err, "task status update failed");
            DropNotice::Failed(err.server_message().unwrap_or_default().to_string())
        }
    };
    Dropped { notice, reloaded: load_all(api, RELOAD).await }
}
