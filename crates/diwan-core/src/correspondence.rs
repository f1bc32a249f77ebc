//! Correspondence — incoming and outgoing mail records.
//!
//! Correspondence is one logical entity physically split across two storage
//! partitions by its [`CorrespondenceKind`]. The kind is immutable after
//! creation (it determines which partition the record lives in), which is
//! why [`CorrespondencePatch`] carries no kind field.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{backend::Collection, ids};

// ─── Enums ───────────────────────────────────────────────────────────────────

/// The partition discriminant: which direction the mail travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorrespondenceKind {
  #[default]
  Incoming,
  Outgoing,
}

impl CorrespondenceKind {
  /// The backend partition this kind of record is stored in.
  pub fn collection(self) -> Collection {
    match self {
      Self::Incoming => Collection::IncomingCorrespondence,
      Self::Outgoing => Collection::OutgoingCorrespondence,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidentiality {
  #[default]
  Normal,
  Secret,
  TopSecret,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
  #[default]
  Normal,
  Urgent,
  Immediate,
}

/// Processing status. Flat enumeration, no enforced transition graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrespondenceStatus {
  #[default]
  Registered,
  UnderReview,
  Referred,
  Closed,
  Archived,
  Sent,
  Draft,
}

impl CorrespondenceStatus {
  /// Whether the record still needs attention.
  pub fn is_open(self) -> bool { !matches!(self, Self::Closed | Self::Archived) }
}

// ─── Routing ─────────────────────────────────────────────────────────────────

/// One transfer in a record's routing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingEntry {
  pub to_department_id:   String,
  pub from_department_id: Option<String>,
  pub transferred_by:     Option<String>,
  pub notes:              Option<String>,
  pub at:                 DateTime<Utc>,
}

// ─── Correspondence ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Correspondence {
  pub id:              String,
  /// Reference number; unique per kind by office convention.
  pub number:          String,
  pub kind:            CorrespondenceKind,
  pub subject:         String,
  pub sender:          Option<String>,
  pub recipient:       Option<String>,
  pub confidentiality: Confidentiality,
  pub urgency:         Urgency,
  pub status:          CorrespondenceStatus,
  pub department_id:   Option<String>,
  pub division_id:     Option<String>,
  /// The employee currently responsible for the record.
  pub assigned_to:     Option<String>,
  pub linked_task_id:  Option<String>,
  pub routing_history: Vec<RoutingEntry>,
  /// The date on the letter itself, distinct from `created_at`.
  pub date:            NaiveDate,
  pub created_at:      DateTime<Utc>,
  pub updated_at:      DateTime<Utc>,
}

impl Correspondence {
  /// Build the store-facing record from form input, assigning the id and
  /// timestamps client-side.
  pub fn from_new(new: NewCorrespondence) -> Self {
    let now = Utc::now();
    Self {
      id: ids::next_id(),
      number: new.number,
      kind: new.kind,
      subject: new.subject,
      sender: new.sender,
      recipient: new.recipient,
      confidentiality: new.confidentiality,
      urgency: new.urgency,
      status: new.status,
      department_id: new.department_id,
      division_id: new.division_id,
      assigned_to: new.assigned_to,
      linked_task_id: new.linked_task_id,
      routing_history: new.routing_history,
      date: new.date.unwrap_or_else(|| now.date_naive()),
      created_at: now,
      updated_at: now,
    }
  }
}

/// Input for creating a [`Correspondence`] record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewCorrespondence {
  pub number:          String,
  #[serde(default)]
  pub kind:            CorrespondenceKind,
  #[serde(default)]
  pub subject:         String,
  pub sender:          Option<String>,
  pub recipient:       Option<String>,
  #[serde(default)]
  pub confidentiality: Confidentiality,
  #[serde(default)]
  pub urgency:         Urgency,
  #[serde(default)]
  pub status:          CorrespondenceStatus,
  pub department_id:   Option<String>,
  pub division_id:     Option<String>,
  pub assigned_to:     Option<String>,
  pub linked_task_id:  Option<String>,
  #[serde(default)]
  pub routing_history: Vec<RoutingEntry>,
  /// Defaults to today when absent.
  pub date:            Option<NaiveDate>,
}

/// Shallow-merge patch for [`Correspondence`]. The kind is immutable and
/// deliberately absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrespondencePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub number:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subject:         Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub sender:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub recipient:       Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub confidentiality: Option<Confidentiality>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub urgency:         Option<Urgency>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:          Option<CorrespondenceStatus>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department_id:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub division_id:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub assigned_to:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub linked_task_id:  Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub routing_history: Option<Vec<RoutingEntry>>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date:            Option<NaiveDate>,
}
