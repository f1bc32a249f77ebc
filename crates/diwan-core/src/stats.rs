//! Derived statistics — computed read models for dashboards.
//!
//! Everything here is recomputed from the collections on every call. There
//! is no caching and no incremental maintenance; callers that need fresher
//! numbers simply call again.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
  correspondence::{Correspondence, CorrespondenceKind, Urgency},
  employee::{Employee, EmployeeStatus},
  task::{Task, TaskStatus},
};

// ─── Tasks ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStats {
  pub total:           usize,
  pub new:             usize,
  pub in_progress:     usize,
  pub completed:       usize,
  pub overdue:         usize,
  pub total_points:    u64,
  /// Completed share as a percentage; 0 when there are no tasks.
  pub completion_rate: f64,
}

impl TaskStats {
  pub fn compute(tasks: &[Task]) -> Self {
    let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
    let total = tasks.len();
    let completed = count(TaskStatus::Completed);
    let completion_rate = if total == 0 {
      0.0
    } else {
      completed as f64 * 100.0 / total as f64
    };
    Self {
      total,
      new: count(TaskStatus::New),
      in_progress: count(TaskStatus::InProgress),
      completed,
      overdue: count(TaskStatus::Overdue),
      total_points: tasks.iter().map(|t| u64::from(t.points)).sum(),
      completion_rate,
    }
  }
}

// ─── Correspondence ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrespondenceStats {
  pub total:    usize,
  pub incoming: usize,
  pub outgoing: usize,
  /// Records whose urgency is above normal.
  pub urgent:   usize,
  /// Records not yet closed or archived.
  pub open:     usize,
}

impl CorrespondenceStats {
  pub fn compute(records: &[Correspondence]) -> Self {
    Self {
      total:    records.len(),
      incoming: records
        .iter()
        .filter(|c| c.kind == CorrespondenceKind::Incoming)
        .count(),
      outgoing: records
        .iter()
        .filter(|c| c.kind == CorrespondenceKind::Outgoing)
        .count(),
      urgent:   records.iter().filter(|c| c.urgency != Urgency::Normal).count(),
      open:     records.iter().filter(|c| c.status.is_open()).count(),
    }
  }
}

// ─── Employees ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeStats {
  pub total:  usize,
  pub active: usize,
}

impl EmployeeStats {
  pub fn compute(employees: &[Employee]) -> Self {
    Self {
      total:  employees.len(),
      active: employees
        .iter()
        .filter(|e| e.status == EmployeeStatus::Active)
        .count(),
    }
  }
}

/// Derived per-department head counts, keyed by department id. Employees
/// without a department are not counted.
pub fn employee_counts_by_department(employees: &[Employee]) -> HashMap<String, usize> {
  let mut counts = HashMap::new();
  for employee in employees {
    if let Some(department_id) = &employee.department_id {
      *counts.entry(department_id.clone()).or_insert(0) += 1;
    }
  }
  counts
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::task::NewTask;

  fn task(status: TaskStatus, points: u32) -> Task {
    let mut task = Task::from_new(NewTask {
      title: "t".to_owned(),
      ..NewTask::default()
    });
    task.status = status;
    task.points = points;
    task
  }

  #[test]
  fn task_stats_counts_and_rate() {
    let tasks = vec![
      task(TaskStatus::New, 5),
      task(TaskStatus::Completed, 10),
      task(TaskStatus::Completed, 15),
      task(TaskStatus::Overdue, 0),
    ];
    let stats = TaskStats::compute(&tasks);
    assert_eq!(stats.total, 4);
    assert_eq!(stats.completed, 2);
    assert_eq!(stats.total_points, 30);
    assert!((stats.completion_rate - 50.0).abs() < f64::EPSILON);
  }

  #[test]
  fn task_stats_empty_rate_is_zero() {
    let stats = TaskStats::compute(&[]);
    assert_eq!(stats.completion_rate, 0.0);
  }
}
