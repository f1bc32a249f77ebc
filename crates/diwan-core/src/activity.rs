//! Activity log — an append-only trail of who changed what.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The in-memory log keeps only the most recent entries; the oldest are
/// evicted when a new entry pushes the count past this cap.
pub const ACTIVITY_LOG_CAP: usize = 1000;

/// Which part of the system produced the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
  Tasks,
  Correspondence,
  Employees,
  Departments,
  Divisions,
  Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
  Created,
  Updated,
  Deleted,
}

/// One log record. Entries are never updated or individually deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityEntry {
  pub id:        String,
  pub module:    Module,
  pub action:    Action,
  pub user_id:   Option<String>,
  pub user_name: Option<String>,
  pub details:   String,
  pub timestamp: DateTime<Utc>,
}
