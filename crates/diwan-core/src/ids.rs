//! Client-side id generation.
//!
//! Ids are opaque strings ordered by creation time: the millisecond
//! timestamp plus a process-wide sequence number so bursts of creations
//! stay unique.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Produce the next record id, e.g. `"1735689600000-42"`.
pub fn next_id() -> String {
  let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
  format!("{}-{seq}", Utc::now().timestamp_millis())
}
