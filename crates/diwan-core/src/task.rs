//! Task — a unit of assigned work, optionally recurring and optionally
//! linked back to a correspondence record.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

// ─── Enums ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  Low,
  #[default]
  Medium,
  High,
  Urgent,
}

/// Where a task sits in its lifecycle. A flat enumeration with no enforced
/// transition graph: any status may be set to any other via update, and
/// validity of transitions is the caller's convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
  #[default]
  New,
  InProgress,
  Completed,
  Overdue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurrenceFrequency {
  Daily,
  Weekly,
  Monthly,
  Yearly,
}

/// Recurrence pattern for repeating tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recurrence {
  pub frequency: RecurrenceFrequency,
  /// Every `interval` periods, e.g. every 2 weeks.
  pub interval:  u32,
  /// Recurrence stops after this date, if set.
  pub until:     Option<NaiveDate>,
}

// ─── Task ────────────────────────────────────────────────────────────────────

/// If `status` is [`TaskStatus::Completed`], `completed_by` should be
/// non-empty — enforced by the caller, not the store. Likewise `end_date`
/// ≥ `start_date` is a form-layer concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
  pub id:                       String,
  pub title:                    String,
  pub description:              String,
  pub priority:                 Priority,
  pub status:                   TaskStatus,
  pub department_id:            Option<String>,
  pub division_id:              Option<String>,
  /// Employee ids this task is assigned to. Plain id strings; no
  /// referential integrity is enforced.
  pub assigned_to:              Vec<String>,
  pub completed_by:             Vec<String>,
  pub start_date:               Option<NaiveDate>,
  pub end_date:                 Option<NaiveDate>,
  pub points:                   u32,
  pub is_recurring:             bool,
  pub recurrence:               Option<Recurrence>,
  pub linked_correspondence_id: Option<String>,
  pub tags:                     Vec<String>,
  pub created_by:               Option<String>,
  pub created_at:               DateTime<Utc>,
  pub updated_at:               DateTime<Utc>,
}

impl Task {
  /// Build the store-facing record from form input, assigning the id and
  /// timestamps client-side.
  pub fn from_new(new: NewTask) -> Self {
    let now = Utc::now();
    Self {
      id: ids::next_id(),
      title: new.title,
      description: new.description,
      priority: new.priority,
      status: new.status,
      department_id: new.department_id,
      division_id: new.division_id,
      assigned_to: new.assigned_to,
      completed_by: new.completed_by,
      start_date: new.start_date,
      end_date: new.end_date,
      points: new.points,
      is_recurring: new.is_recurring,
      recurrence: new.recurrence,
      linked_correspondence_id: new.linked_correspondence_id,
      tags: new.tags,
      created_by: new.created_by,
      created_at: now,
      updated_at: now,
    }
  }
}

/// Input for creating a [`Task`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
  pub title:                    String,
  #[serde(default)]
  pub description:              String,
  #[serde(default)]
  pub priority:                 Priority,
  #[serde(default)]
  pub status:                   TaskStatus,
  pub department_id:            Option<String>,
  pub division_id:              Option<String>,
  #[serde(default)]
  pub assigned_to:              Vec<String>,
  #[serde(default)]
  pub completed_by:             Vec<String>,
  pub start_date:               Option<NaiveDate>,
  pub end_date:                 Option<NaiveDate>,
  #[serde(default)]
  pub points:                   u32,
  #[serde(default)]
  pub is_recurring:             bool,
  pub recurrence:               Option<Recurrence>,
  pub linked_correspondence_id: Option<String>,
  #[serde(default)]
  pub tags:                     Vec<String>,
  pub created_by:               Option<String>,
}

/// Shallow-merge patch for [`Task`]; only present fields are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub title:                    Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub priority:                 Option<Priority>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:                   Option<TaskStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department_id:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub division_id:              Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assigned_to:              Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub completed_by:             Option<Vec<String>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub start_date:               Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub end_date:                 Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub points:                   Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_recurring:             Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recurrence:               Option<Recurrence>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub linked_correspondence_id: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tags:                     Option<Vec<String>>,
}
