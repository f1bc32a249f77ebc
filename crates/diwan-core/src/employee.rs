//! Employee records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
  #[default]
  Active,
  OnLeave,
  Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
  pub id:              String,
  pub name:            String,
  pub employee_number: String,
  pub email:           Option<String>,
  pub phone:           Option<String>,
  pub position:        Option<String>,
  pub department_id:   Option<String>,
  pub division_id:     Option<String>,
  /// Accumulated reward points from completed tasks.
  pub points:          u32,
  pub status:          EmployeeStatus,
  pub created_at:      DateTime<Utc>,
}

impl Employee {
  pub fn from_new(new: NewEmployee) -> Self {
    Self {
      id: ids::next_id(),
      name: new.name,
      employee_number: new.employee_number,
      email: new.email,
      phone: new.phone,
      position: new.position,
      department_id: new.department_id,
      division_id: new.division_id,
      points: new.points,
      status: new.status,
      created_at: Utc::now(),
    }
  }
}

/// Input for creating an [`Employee`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewEmployee {
  pub name:            String,
  #[serde(default)]
  pub employee_number: String,
  pub email:           Option<String>,
  pub phone:           Option<String>,
  pub position:        Option<String>,
  pub department_id:   Option<String>,
  pub division_id:     Option<String>,
  #[serde(default)]
  pub points:          u32,
  #[serde(default)]
  pub status:          EmployeeStatus,
}

/// Shallow-merge patch for [`Employee`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub name:            Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub employee_number: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub email:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub phone:           Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub position:        Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub department_id:   Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub division_id:     Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub points:          Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub status:          Option<EmployeeStatus>,
}
