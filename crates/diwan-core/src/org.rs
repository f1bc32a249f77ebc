//! Departments and their divisions.
//!
//! Employee counts are derived statistics (see [`crate::stats`]), never
//! stored on the department itself.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

// ─── Department ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
  pub id:          String,
  pub name:        String,
  pub description: Option<String>,
  pub created_at:  DateTime<Utc>,
}

impl Department {
  pub fn from_new(new: NewDepartment) -> Self {
    Self {
      id:          ids::next_id(),
      name:        new.name,
      description: new.description,
      created_at:  Utc::now(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDepartment {
  pub name:        String,
  pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

// ─── Division ────────────────────────────────────────────────────────────────

/// A division belongs to a department via a plain id back-reference; no
/// referential integrity is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Division {
  pub id:            String,
  pub name:          String,
  pub description:   Option<String>,
  pub department_id: String,
  pub created_at:    DateTime<Utc>,
}

impl Division {
  pub fn from_new(new: NewDivision) -> Self {
    Self {
      id:            ids::next_id(),
      name:          new.name,
      description:   new.description,
      department_id: new.department_id,
      created_at:    Utc::now(),
    }
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewDivision {
  pub name:          String,
  pub description:   Option<String>,
  #[serde(default)]
  pub department_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DivisionPatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:          Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub description:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department_id: Option<String>,
}
