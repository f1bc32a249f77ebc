//! [`EntityStore`] — the single source of truth for all domain collections.
//!
//! Every CRUD action writes through to the [`Backend`] first and mutates
//! the in-memory collection only after the write succeeds, so a failed
//! write leaves memory untouched and the error propagates to the caller.
//! Loads replace a collection wholesale and degrade to an empty collection
//! on failure (warn-level trace, no error to the caller).
//!
//! The state lock is held only across the memory mutation, never across a
//! backend await: concurrent updates racing on one id interleave exactly as
//! they would on a single-threaded event loop, last write wins. There is no
//! per-record versioning and no writer queue; this is an accepted
//! limitation, not a bug.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::sync::RwLock;

use crate::{
  activity::{ACTIVITY_LOG_CAP, Action, ActivityEntry, Module},
  backend::{Backend, Collection},
  correspondence::{Correspondence, CorrespondenceKind, CorrespondencePatch},
  employee::{Employee, EmployeePatch},
  error::{Error, Result},
  ids,
  merge::shallow_merge,
  org::{Department, DepartmentPatch, Division, DivisionPatch},
  settings::{SettingsPatch, SystemSettings},
  task::{Task, TaskPatch},
};

/// Delay before a log entry is flushed to the backend. Log persistence is
/// deferred and best-effort so it can never block or fail the primary
/// mutation.
const LOG_PERSIST_DELAY: Duration = Duration::from_millis(100);

// ─── UI state ────────────────────────────────────────────────────────────────

/// The signed-in user; attached to activity-log entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
  pub id:   String,
  pub name: String,
}

/// Presentation state the store tracks alongside the collections.
#[derive(Debug, Clone, Default)]
pub struct UiState {
  pub current_page: String,
  pub sidebar_open: bool,
  pub current_user: Option<CurrentUser>,
}

// ─── In-memory state ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct AppState {
  employees:      Vec<Employee>,
  tasks:          Vec<Task>,
  /// Both partitions merged; each record's kind says where it lives.
  correspondence: Vec<Correspondence>,
  departments:    Vec<Department>,
  divisions:      Vec<Division>,
  /// Newest first, capped at [`ACTIVITY_LOG_CAP`].
  activity_log:   Vec<ActivityEntry>,
  settings:       SystemSettings,
  ui:             UiState,
}

/// Implemented by every entity held in a store collection.
trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
  fn id(&self) -> &str;
}

impl Record for Employee {
  fn id(&self) -> &str { &self.id }
}
impl Record for Task {
  fn id(&self) -> &str { &self.id }
}
impl Record for Correspondence {
  fn id(&self) -> &str { &self.id }
}
impl Record for Department {
  fn id(&self) -> &str { &self.id }
}
impl Record for Division {
  fn id(&self) -> &str { &self.id }
}
impl Record for ActivityEntry {
  fn id(&self) -> &str { &self.id }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// The reducer + action layer over an injected backend. Construct one per
/// process (or per test) and share it by `Arc`; there is no ambient global
/// store.
pub struct EntityStore<B: Backend> {
  backend: Arc<B>,
  state:   RwLock<AppState>,
}

impl<B: Backend + 'static> EntityStore<B> {
  pub fn new(backend: Arc<B>) -> Self {
    Self { backend, state: RwLock::new(AppState::default()) }
  }

  // ── Generic CRUD plumbing ─────────────────────────────────────────────────

  async fn fetch_all<T: Record>(&self, collection: Collection) -> Result<Vec<T>> {
    let raw = self
      .backend
      .get_all(collection)
      .await
      .map_err(Error::backend)?;
    raw
      .into_iter()
      .map(|value| Ok(serde_json::from_value(value)?))
      .collect()
  }

  async fn load_collection<T: Record>(
    &self,
    collection: Collection,
    slot: fn(&mut AppState) -> &mut Vec<T>,
  ) {
    let records = match self.fetch_all::<T>(collection).await {
      Ok(records) => records,
      Err(e) => {
        tracing::warn!(
          collection = collection.as_str(),
          error = %e,
          "load failed; collection reset to empty"
        );
        Vec::new()
      }
    };
    let mut state = self.state.write().await;
    *slot(&mut state) = records;
  }

  async fn add_record<T: Record>(
    &self,
    collection: Collection,
    record: T,
    slot: fn(&mut AppState) -> &mut Vec<T>,
  ) -> Result<()> {
    let value = serde_json::to_value(&record)?;
    self
      .backend
      .add(collection, value)
      .await
      .map_err(Error::backend)?;
    let mut state = self.state.write().await;
    // Append without deduping by id; the store never merges on add.
    slot(&mut state).push(record);
    Ok(())
  }

  async fn update_record<T: Record>(
    &self,
    collection: Collection,
    id: &str,
    patch: Value,
    slot: fn(&mut AppState) -> &mut Vec<T>,
  ) -> Result<()> {
    self
      .backend
      .update(collection, id, patch.clone())
      .await
      .map_err(Error::backend)?;
    let mut state = self.state.write().await;
    // A missing id leaves the collection untouched.
    if let Some(existing) = slot(&mut state).iter_mut().find(|r| r.id() == id) {
      let mut merged = serde_json::to_value(&*existing)?;
      shallow_merge(&mut merged, &patch);
      *existing = serde_json::from_value(merged)?;
    }
    Ok(())
  }

  async fn delete_record<T: Record>(
    &self,
    collection: Collection,
    id: &str,
    slot: fn(&mut AppState) -> &mut Vec<T>,
  ) -> Result<()> {
    self
      .backend
      .delete(collection, id)
      .await
      .map_err(Error::backend)?;
    let mut state = self.state.write().await;
    slot(&mut state).retain(|r| r.id() != id);
    Ok(())
  }

  // ── Employees ─────────────────────────────────────────────────────────────

  pub async fn load_employees(&self) {
    self
      .load_collection(Collection::Employees, |s| &mut s.employees)
      .await;
  }

  pub async fn add_employee(&self, employee: Employee) -> Result<()> {
    let details = format!("added employee {}", employee.name);
    self
      .add_record(Collection::Employees, employee, |s| &mut s.employees)
      .await?;
    self
      .log_activity(Module::Employees, Action::Created, details)
      .await;
    Ok(())
  }

  pub async fn update_employee(&self, id: &str, patch: EmployeePatch) -> Result<()> {
    let patch = serde_json::to_value(&patch)?;
    self
      .update_record(Collection::Employees, id, patch, |s| &mut s.employees)
      .await?;
    self
      .log_activity(Module::Employees, Action::Updated, format!("updated employee {id}"))
      .await;
    Ok(())
  }

  pub async fn delete_employee(&self, id: &str) -> Result<()> {
    self
      .delete_record::<Employee>(Collection::Employees, id, |s| &mut s.employees)
      .await?;
    self
      .log_activity(Module::Employees, Action::Deleted, format!("deleted employee {id}"))
      .await;
    Ok(())
  }

  pub async fn employees(&self) -> Vec<Employee> {
    self.state.read().await.employees.clone()
  }

  pub async fn employee(&self, id: &str) -> Option<Employee> {
    let state = self.state.read().await;
    state.employees.iter().find(|e| e.id == id).cloned()
  }

  // ── Tasks ─────────────────────────────────────────────────────────────────

  pub async fn load_tasks(&self) {
    self.load_collection(Collection::Tasks, |s| &mut s.tasks).await;
  }

  pub async fn add_task(&self, task: Task) -> Result<()> {
    let details = format!("added task {}", task.title);
    self
      .add_record(Collection::Tasks, task, |s| &mut s.tasks)
      .await?;
    self.log_activity(Module::Tasks, Action::Created, details).await;
    Ok(())
  }

  pub async fn update_task(&self, id: &str, patch: TaskPatch) -> Result<()> {
    let patch = stamp_updated_at(serde_json::to_value(&patch)?);
    self
      .update_record(Collection::Tasks, id, patch, |s| &mut s.tasks)
      .await?;
    self
      .log_activity(Module::Tasks, Action::Updated, format!("updated task {id}"))
      .await;
    Ok(())
  }

  pub async fn delete_task(&self, id: &str) -> Result<()> {
    self
      .delete_record::<Task>(Collection::Tasks, id, |s| &mut s.tasks)
      .await?;
    self
      .log_activity(Module::Tasks, Action::Deleted, format!("deleted task {id}"))
      .await;
    Ok(())
  }

  pub async fn tasks(&self) -> Vec<Task> {
    self.state.read().await.tasks.clone()
  }

  pub async fn task(&self, id: &str) -> Option<Task> {
    let state = self.state.read().await;
    state.tasks.iter().find(|t| t.id == id).cloned()
  }

  // ── Correspondence ────────────────────────────────────────────────────────

  /// Load both partitions and replace the merged collection. A failure in
  /// either partition resets the whole collection to empty.
  pub async fn load_correspondence(&self) {
    let merged = async {
      let mut records = self.fetch_partition(CorrespondenceKind::Incoming).await?;
      records.extend(self.fetch_partition(CorrespondenceKind::Outgoing).await?);
      Ok::<_, Error>(records)
    }
    .await;

    let records = match merged {
      Ok(records) => records,
      Err(e) => {
        tracing::warn!(error = %e, "correspondence load failed; collection reset to empty");
        Vec::new()
      }
    };
    self.state.write().await.correspondence = records;
  }

  async fn fetch_partition(&self, kind: CorrespondenceKind) -> Result<Vec<Correspondence>> {
    let mut records: Vec<Correspondence> = self.fetch_all(kind.collection()).await?;
    // The partition a record came from, not the stored body, is
    // authoritative for its kind.
    for record in &mut records {
      record.kind = kind;
    }
    Ok(records)
  }

  pub async fn add_correspondence(&self, record: Correspondence) -> Result<()> {
    let collection = record.kind.collection();
    let details = format!("registered correspondence {}", record.number);
    self
      .add_record(collection, record, |s| &mut s.correspondence)
      .await?;
    self
      .log_activity(Module::Correspondence, Action::Created, details)
      .await;
    Ok(())
  }

  /// Resolve the partition of `id` from the in-memory collection. This
  /// lookup-before-route is what lets update/delete reach the right
  /// partition; an id the store has never seen is an error.
  async fn correspondence_collection(&self, id: &str) -> Result<Collection> {
    let state = self.state.read().await;
    state
      .correspondence
      .iter()
      .find(|c| c.id == id)
      .map(|c| c.kind.collection())
      .ok_or_else(|| Error::CorrespondenceNotFound(id.to_owned()))
  }

  pub async fn update_correspondence(
    &self,
    id: &str,
    patch: CorrespondencePatch,
  ) -> Result<()> {
    let collection = self.correspondence_collection(id).await?;
    let patch = stamp_updated_at(serde_json::to_value(&patch)?);
    self
      .update_record(collection, id, patch, |s| &mut s.correspondence)
      .await?;
    self
      .log_activity(
        Module::Correspondence,
        Action::Updated,
        format!("updated correspondence {id}"),
      )
      .await;
    Ok(())
  }

  pub async fn delete_correspondence(&self, id: &str) -> Result<()> {
    let collection = self.correspondence_collection(id).await?;
    self
      .delete_record::<Correspondence>(collection, id, |s| &mut s.correspondence)
      .await?;
    self
      .log_activity(
        Module::Correspondence,
        Action::Deleted,
        format!("deleted correspondence {id}"),
      )
      .await;
    Ok(())
  }

  pub async fn correspondence(&self) -> Vec<Correspondence> {
    self.state.read().await.correspondence.clone()
  }

  pub async fn correspondence_by_id(&self, id: &str) -> Option<Correspondence> {
    let state = self.state.read().await;
    state.correspondence.iter().find(|c| c.id == id).cloned()
  }

  // ── Departments ───────────────────────────────────────────────────────────

  pub async fn load_departments(&self) {
    self
      .load_collection(Collection::Departments, |s| &mut s.departments)
      .await;
  }

  pub async fn add_department(&self, department: Department) -> Result<()> {
    let details = format!("added department {}", department.name);
    self
      .add_record(Collection::Departments, department, |s| &mut s.departments)
      .await?;
    self
      .log_activity(Module::Departments, Action::Created, details)
      .await;
    Ok(())
  }

  pub async fn update_department(&self, id: &str, patch: DepartmentPatch) -> Result<()> {
    let patch = serde_json::to_value(&patch)?;
    self
      .update_record(Collection::Departments, id, patch, |s| &mut s.departments)
      .await?;
    self
      .log_activity(
        Module::Departments,
        Action::Updated,
        format!("updated department {id}"),
      )
      .await;
    Ok(())
  }

  pub async fn delete_department(&self, id: &str) -> Result<()> {
    self
      .delete_record::<Department>(Collection::Departments, id, |s| &mut s.departments)
      .await?;
    self
      .log_activity(
        Module::Departments,
        Action::Deleted,
        format!("deleted department {id}"),
      )
      .await;
    Ok(())
  }

  pub async fn departments(&self) -> Vec<Department> {
    self.state.read().await.departments.clone()
  }

  pub async fn department(&self, id: &str) -> Option<Department> {
    let state = self.state.read().await;
    state.departments.iter().find(|d| d.id == id).cloned()
  }

  // ── Divisions ─────────────────────────────────────────────────────────────

  pub async fn load_divisions(&self) {
    self
      .load_collection(Collection::Divisions, |s| &mut s.divisions)
      .await;
  }

  pub async fn add_division(&self, division: Division) -> Result<()> {
    let details = format!("added division {}", division.name);
    self
      .add_record(Collection::Divisions, division, |s| &mut s.divisions)
      .await?;
    self
      .log_activity(Module::Divisions, Action::Created, details)
      .await;
    Ok(())
  }

  pub async fn update_division(&self, id: &str, patch: DivisionPatch) -> Result<()> {
    let patch = serde_json::to_value(&patch)?;
    self
      .update_record(Collection::Divisions, id, patch, |s| &mut s.divisions)
      .await?;
    self
      .log_activity(Module::Divisions, Action::Updated, format!("updated division {id}"))
      .await;
    Ok(())
  }

  pub async fn delete_division(&self, id: &str) -> Result<()> {
    self
      .delete_record::<Division>(Collection::Divisions, id, |s| &mut s.divisions)
      .await?;
    self
      .log_activity(Module::Divisions, Action::Deleted, format!("deleted division {id}"))
      .await;
    Ok(())
  }

  pub async fn divisions(&self) -> Vec<Division> {
    self.state.read().await.divisions.clone()
  }

  pub async fn division(&self, id: &str) -> Option<Division> {
    let state = self.state.read().await;
    state.divisions.iter().find(|d| d.id == id).cloned()
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  pub async fn load_settings(&self) {
    let loaded = async {
      let raw = self
        .backend
        .get_by_id(Collection::Settings, SystemSettings::ID)
        .await
        .map_err(Error::backend)?;
      raw
        .map(serde_json::from_value)
        .transpose()
        .map_err(Error::from)
    }
    .await;

    let settings = match loaded {
      Ok(Some(settings)) => settings,
      Ok(None) => SystemSettings::default(),
      Err(e) => {
        tracing::warn!(error = %e, "settings load failed; using defaults");
        SystemSettings::default()
      }
    };
    self.state.write().await.settings = settings;
  }

  /// Merge `patch` into the singleton and persist the full merged record.
  pub async fn update_settings(&self, patch: SettingsPatch) -> Result<()> {
    let patch = serde_json::to_value(&patch)?;
    let merged = {
      let state = self.state.read().await;
      let mut value = serde_json::to_value(&state.settings)?;
      shallow_merge(&mut value, &patch);
      value
    };
    self
      .backend
      .add(Collection::Settings, merged.clone())
      .await
      .map_err(Error::backend)?;
    let settings = serde_json::from_value(merged)?;
    self.state.write().await.settings = settings;
    self
      .log_activity(Module::Settings, Action::Updated, "updated system settings".to_owned())
      .await;
    Ok(())
  }

  pub async fn settings(&self) -> SystemSettings {
    self.state.read().await.settings.clone()
  }

  // ── Activity log ──────────────────────────────────────────────────────────

  pub async fn load_activity(&self) {
    let entries = match self.fetch_all::<ActivityEntry>(Collection::ActivityLog).await {
      Ok(mut entries) => {
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        entries.truncate(ACTIVITY_LOG_CAP);
        entries
      }
      Err(e) => {
        tracing::warn!(error = %e, "activity log load failed; log reset to empty");
        Vec::new()
      }
    };
    self.state.write().await.activity_log = entries;
  }

  pub async fn activity_log(&self) -> Vec<ActivityEntry> {
    self.state.read().await.activity_log.clone()
  }

  /// Append a log entry: synchronously to memory (evicting the oldest past
  /// the cap), then fire-and-forget to the backend after a short delay.
  async fn log_activity(&self, module: Module, action: Action, details: String) {
    let entry = {
      let mut state = self.state.write().await;
      let user = state.ui.current_user.clone();
      let entry = ActivityEntry {
        id: ids::next_id(),
        module,
        action,
        user_id: user.as_ref().map(|u| u.id.clone()),
        user_name: user.map(|u| u.name),
        details,
        timestamp: Utc::now(),
      };
      state.activity_log.insert(0, entry.clone());
      state.activity_log.truncate(ACTIVITY_LOG_CAP);
      entry
    };

    if !self.backend.is_initialized() {
      return;
    }
    let value = match serde_json::to_value(&entry) {
      Ok(value) => value,
      Err(e) => {
        tracing::warn!(error = %e, "could not encode activity entry");
        return;
      }
    };
    let backend = Arc::clone(&self.backend);
    tokio::spawn(async move {
      tokio::time::sleep(LOG_PERSIST_DELAY).await;
      if let Err(e) = backend.add(Collection::ActivityLog, value).await {
        // Best-effort: the log must never fail the primary mutation.
        tracing::warn!(error = %e, "activity log write failed");
      }
    });
  }

  // ── UI state ──────────────────────────────────────────────────────────────

  pub async fn set_current_user(&self, user: Option<CurrentUser>) {
    self.state.write().await.ui.current_user = user;
  }

  pub async fn current_user(&self) -> Option<CurrentUser> {
    self.state.read().await.ui.current_user.clone()
  }

  pub async fn set_current_page(&self, page: impl Into<String>) {
    self.state.write().await.ui.current_page = page.into();
  }

  pub async fn current_page(&self) -> String {
    self.state.read().await.ui.current_page.clone()
  }

  pub async fn set_sidebar_open(&self, open: bool) {
    self.state.write().await.ui.sidebar_open = open;
  }

  pub async fn sidebar_open(&self) -> bool {
    self.state.read().await.ui.sidebar_open
  }

  // ── Startup ───────────────────────────────────────────────────────────────

  /// Run every load in sequence. Used at server startup; individual
  /// failures degrade to empty collections as usual.
  pub async fn load_all(&self) {
    self.load_employees().await;
    self.load_tasks().await;
    self.load_correspondence().await;
    self.load_departments().await;
    self.load_divisions().await;
    self.load_activity().await;
    self.load_settings().await;
  }
}

/// Stamp `updated_at` into an object patch so merges refresh it.
fn stamp_updated_at(mut patch: Value) -> Value {
  if let Value::Object(map) = &mut patch {
    map.insert(
      "updated_at".to_owned(),
      Value::String(Utc::now().to_rfc3339()),
    );
  }
  patch
}
